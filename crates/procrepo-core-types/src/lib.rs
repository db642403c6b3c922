//! Core types shared across procrepo facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Correlation types**: RequestId
//! - **Schema constants**: Canonical event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
