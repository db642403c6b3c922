use serde::{Deserialize, Serialize};

/// ProcessDefinition - one versioned process template
///
/// Definitions sharing a `key` are successive versions of the same process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    /// Unique identifier (UUID v7)
    pub id: String,

    /// Logical name grouping versions; not unique
    pub key: String,

    pub name: String,

    /// Version within `key`, starting at 1
    pub version: u32,

    /// `None` until a category is set; an empty string is a valid category
    pub category: Option<String>,

    /// Owning deployment. May dangle after a non-cascading deployment delete.
    pub deployment_id: String,

    pub suspended: bool,
}

impl ProcessDefinition {
    /// Create an active, uncategorised definition
    pub fn new(
        id: String,
        key: String,
        name: String,
        version: u32,
        deployment_id: String,
    ) -> Self {
        Self {
            id,
            key,
            name,
            version,
            category: None,
            deployment_id,
            suspended: false,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}
