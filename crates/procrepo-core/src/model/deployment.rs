use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named resource packaged with a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentResource {
    pub name: String,
    pub content: Vec<u8>,
}

impl DeploymentResource {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Deployment - a package grouping process definitions and resources
///
/// A deployment never changes after creation. Process definitions point at
/// it through `deployment_id`; the deployment itself keeps no list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Unique identifier (UUID v7)
    pub id: String,

    pub name: String,

    /// Packaged resources in insertion order, names unique within the deployment
    pub resources: Vec<DeploymentResource>,

    /// Timestamp when this deployment was created
    pub created_at: DateTime<Utc>,
}

impl Deployment {
    /// Create a deployment with no resources, stamped with the current time
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            resources: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Names of all packaged resources, in insertion order
    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name.clone()).collect()
    }

    /// Look up a resource by name
    pub fn resource(&self, name: &str) -> Option<&DeploymentResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Add a resource, replacing the content of an existing one with the same name
    ///
    /// A replaced resource keeps its original position.
    pub fn put_resource(&mut self, resource: DeploymentResource) {
        match self.resources.iter_mut().find(|r| r.name == resource.name) {
            Some(existing) => existing.content = resource.content,
            None => self.resources.push(resource),
        }
    }
}
