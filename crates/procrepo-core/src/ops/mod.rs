pub mod definition_ops;
pub mod deployment_ops;
pub mod model_ops;
pub mod store;

pub use store::Store;
