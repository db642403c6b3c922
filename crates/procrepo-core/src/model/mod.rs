pub mod definition;
pub mod deployment;
pub mod draft;

pub use definition::ProcessDefinition;
pub use deployment::{Deployment, DeploymentResource};
pub use draft::Model;
