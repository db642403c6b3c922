//! procrepo Core - in-memory process repository
//!
//! This crate provides the catalog layer of a workflow engine:
//! - Deployments with packaged resources, and cascade deletion
//! - Versioned process definitions grouped by key, with suspend/activate
//! - Model drafts with an opaque editor payload
//! - `RepositoryService`, a thread-safe facade over all three collections
//! - The error facility and structured logging facility

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod repository;

pub use procrepo_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RepoError, Result};
pub use model::{Deployment, DeploymentResource, Model, ProcessDefinition};
pub use ops::Store;
pub use repository::{DeploymentBuilder, RepositoryService};
