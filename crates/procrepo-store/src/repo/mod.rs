//! Repository layer bridging the in-memory `Store` and SQLite

pub mod hydration;
pub mod sqlite_repo;

pub use sqlite_repo::{persist_store, read_generation, SqliteRepo};
