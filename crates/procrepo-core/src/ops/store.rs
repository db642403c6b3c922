use std::collections::HashMap;

use crate::errors::{RepoError, Result};
use crate::model::{Deployment, Model, ProcessDefinition};

/// In-memory tables for deployments, process definitions, and models
///
/// Plain HashMaps with no locking. Shared access goes through
/// `RepositoryService`, which owns a `Store` behind a single lock.
/// The `ops` modules implement the repository operations on top of it.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Map of deployment ID to Deployment
    pub(crate) deployments: HashMap<String, Deployment>,
    /// Map of process definition ID to ProcessDefinition
    pub(crate) definitions: HashMap<String, ProcessDefinition>,
    /// Map of model ID to Model
    pub(crate) models: HashMap<String, Model>,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self {
            deployments: HashMap::new(),
            definitions: HashMap::new(),
            models: HashMap::new(),
        }
    }

    /// Get a deployment by ID
    ///
    /// # Errors
    ///
    /// Returns `DeploymentNotFound` if no deployment has this id.
    pub fn get_deployment(&self, id: &str) -> Result<&Deployment> {
        self.deployments
            .get(id)
            .ok_or_else(|| RepoError::DeploymentNotFound {
                deployment_id: id.to_string(),
            })
    }

    /// Get a process definition by ID
    ///
    /// # Errors
    ///
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn get_definition(&self, id: &str) -> Result<&ProcessDefinition> {
        self.definitions
            .get(id)
            .ok_or_else(|| RepoError::ProcessDefinitionNotFound {
                process_definition_id: id.to_string(),
            })
    }

    /// Get a mutable reference to a process definition by ID
    ///
    /// # Errors
    ///
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn get_definition_mut(&mut self, id: &str) -> Result<&mut ProcessDefinition> {
        self.definitions
            .get_mut(id)
            .ok_or_else(|| RepoError::ProcessDefinitionNotFound {
                process_definition_id: id.to_string(),
            })
    }

    /// Get a model by ID
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` if no model has this id.
    pub fn get_model(&self, id: &str) -> Result<&Model> {
        self.models.get(id).ok_or_else(|| RepoError::ModelNotFound {
            model_id: id.to_string(),
        })
    }

    /// Get a mutable reference to a model by ID
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` if no model has this id.
    pub fn get_model_mut(&mut self, id: &str) -> Result<&mut Model> {
        self.models.get_mut(id).ok_or_else(|| RepoError::ModelNotFound {
            model_id: id.to_string(),
        })
    }

    pub fn list_deployments(&self) -> Vec<&Deployment> {
        self.deployments.values().collect()
    }

    pub fn list_definitions(&self) -> Vec<&ProcessDefinition> {
        self.definitions.values().collect()
    }

    pub fn list_models(&self) -> Vec<&Model> {
        self.models.values().collect()
    }

    /// Insert a deployment, replacing any entry with the same id
    ///
    /// Used by the deployment operations and by hydration from storage.
    pub fn insert_deployment(&mut self, deployment: Deployment) {
        self.deployments.insert(deployment.id.clone(), deployment);
    }

    /// Insert a process definition, replacing any entry with the same id
    pub fn insert_definition(&mut self, definition: ProcessDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    /// Insert a model, replacing any entry with the same id
    pub fn insert_model(&mut self, model: Model) {
        self.models.insert(model.id.clone(), model);
    }

    /// Highest version stored for `key`, if any definition carries it
    pub(crate) fn max_version_for_key(&self, key: &str) -> Option<u32> {
        self.definitions
            .values()
            .filter(|d| d.key == key)
            .map(|d| d.version)
            .max()
    }

    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty() && self.definitions.is_empty() && self.models.is_empty()
    }
}
