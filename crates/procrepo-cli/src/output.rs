//! JSON views printed by the commands

use chrono::{DateTime, Utc};
use procrepo_core::{Deployment, Model};
use serde::Serialize;

/// A deployment without its resource payloads
#[derive(Debug, Serialize)]
pub struct DeploymentView {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub resources: Vec<String>,
}

impl From<&Deployment> for DeploymentView {
    fn from(deployment: &Deployment) -> Self {
        Self {
            id: deployment.id.clone(),
            name: deployment.name.clone(),
            created_at: deployment.created_at,
            resources: deployment.resource_names(),
        }
    }
}

/// A model without its editor payload
#[derive(Debug, Serialize)]
pub struct ModelView {
    pub id: String,
    pub name: String,
    pub key: String,
    pub category: String,
    pub version: u32,
    pub meta_info: String,
    pub has_editor_source: bool,
}

impl From<&Model> for ModelView {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id.clone(),
            name: model.name.clone(),
            key: model.key.clone(),
            category: model.category.clone(),
            version: model.version,
            meta_info: model.meta_info.clone(),
            has_editor_source: model.has_editor_source(),
        }
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
