//! # Repository Layer
//!
//! Read-only listing repositories for races and sports events. One generic
//! pipeline (base template, filter compiler, order compiler, row mapper) is
//! instantiated per entity; the per-entity modules only supply column wiring
//! and row conversion.

pub mod builder;
pub mod event;
pub mod listing;
pub(crate) mod queries;
pub mod race;

pub use builder::ListFilter;
pub use event::EventRepository;
pub use listing::{Listed, ListingRepository};
pub use race::RaceRepository;
