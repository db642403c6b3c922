pub mod definition;
pub mod deployment;
pub mod model;
