//! Demonstration-data seeding.
//!
//! Each entity has a seed function that creates its table on demand and
//! fills an empty table with generated rows. Seeding is driven by the
//! repositories' `init` guards and never touches a table that already holds
//! data.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

pub mod event;
pub mod race;

pub use event::seed as seed_events;
pub use race::seed as seed_races;

/// Rows inserted per entity by a fresh seed.
pub(crate) const SEED_ROWS: i64 = 100;

const NAME_REGIONS: &[&str] = &[
    "Northern", "Southern", "Eastern", "Western", "Royal", "Golden", "Coastal", "Highland",
    "Valley", "Harbour",
];

const NAME_MASCOTS: &[&str] = &[
    "Broncos", "Sharks", "Eagles", "Tigers", "Storm", "Raiders", "Panthers", "Knights",
    "Mariners", "Wolves",
];

/// Generates a two-part display name for a fixture row.
pub(crate) fn fixture_name<R: Rng>(rng: &mut R) -> String {
    let region = NAME_REGIONS[rng.gen_range(0..NAME_REGIONS.len())];
    let mascot = NAME_MASCOTS[rng.gen_range(0..NAME_MASCOTS.len())];
    format!("{region} {mascot}")
}

/// A start time uniformly distributed between one day ago and two days
/// from now, so seeded data contains both open and closed entries.
pub(crate) fn fixture_start_time<R: Rng>(rng: &mut R) -> DateTime<Utc> {
    const DAY_SECS: i64 = 86_400;
    Utc::now() + Duration::seconds(rng.gen_range(-DAY_SECS..=2 * DAY_SECS))
}
