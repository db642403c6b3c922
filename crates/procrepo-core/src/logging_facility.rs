//! Structured logging facility for procrepo
//!
//! - Single initialization point via `init(profile)`
//! - Operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! `RepositoryService` owns boundary logging for mutations. The `ops`
//! modules only emit `tracing::debug!` detail.
//!
//! # Usage
//!
//! ```rust
//! use procrepo_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
