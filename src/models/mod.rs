//! # Data Models
//!
//! SeaORM entities for the two listing tables plus the domain records the
//! repositories return.

pub mod event;
pub mod race;

pub use event::Entity as Event;
pub use event::EventRecord;
pub use race::Entity as Race;
pub use race::{RaceRecord, RaceStatus};
