//! # Listings Library
//!
//! Read-only listing repositories for races and sports events over sqlite.
//!
//! The core lives in [`repositories`]: a dynamic query pipeline (base
//! template, filter compiler, order compiler, row mapper) instantiated once
//! per entity. The remaining modules are the plumbing an embedding service
//! needs: configuration, logging, pool management, schema and
//! demonstration-data seeding.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seeds;
