//! procrepo Engine - composition layer
//!
//! Wires a `RepositoryService` to its configuration, the logging facility
//! and an optional SQLite backing file.

pub mod config;
pub mod engine;

pub use config::EngineConfig;
pub use engine::Engine;
