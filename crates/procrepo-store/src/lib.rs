//! Procrepo Store - SQLite persistence for the repository catalog
//!
//! Provides:
//! - SQLite schema with an embedded migrations framework
//! - Full-snapshot persistence of a core `Store`, guarded by a generation
//!   counter so a stale writer cannot overwrite newer data
//! - Hydration of a `Store` from the database

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

pub use errors::Result;
pub use repo::hydration::{load_store, load_store_with_generation};
pub use repo::{persist_store, read_generation};
