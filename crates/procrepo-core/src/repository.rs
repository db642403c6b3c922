//! Thread-safe repository facade
//!
//! `RepositoryService` is the single authoritative catalog of a process. It
//! owns one `Store` behind one `RwLock`, so:
//!
//! - readers run concurrently and never see a half-applied write,
//! - every mutation (including a cascading deployment delete and the
//!   read-then-insert of version assignment) is one critical section.
//!
//! All values are returned as owned clones; callers never hold the lock.
//!
//! ## Logging Ownership
//!
//! Mutations log `start`/`end`/`end_error` boundaries. Reads are not logged.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::errors::Result;
use crate::model::{Deployment, DeploymentResource, Model, ProcessDefinition};
use crate::ops::{definition_ops, deployment_ops, model_ops, Store};
use crate::{log_op_end, log_op_error, log_op_start};

/// Shared handle to the repository; clones point at the same catalog
#[derive(Debug, Clone, Default)]
pub struct RepositoryService {
    inner: Arc<RwLock<Store>>,
}

impl RepositoryService {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding an existing store (e.g. hydrated from disk)
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Consistent copy of all three collections
    pub fn snapshot(&self) -> Store {
        self.read().clone()
    }

    // Mutations never leave the store half-written before a panic can occur,
    // so a poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn logged<T>(
        &self,
        op: &'static str,
        entity_id: &str,
        f: impl FnOnce(&mut Store) -> Result<T>,
    ) -> Result<T> {
        log_op_start!(op, entity_id = entity_id);
        let start = Instant::now();

        let result = f(&mut self.write());

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(op, duration_ms = duration_ms, entity_id = entity_id);
            }
            Err(e) => {
                log_op_error!(op, e.clone(), duration_ms = duration_ms, entity_id = entity_id);
            }
        }
        result
    }

    fn logged_infallible<T>(
        &self,
        op: &'static str,
        entity_id: &str,
        f: impl FnOnce(&mut Store) -> T,
    ) -> T {
        log_op_start!(op, entity_id = entity_id);
        let start = Instant::now();

        let value = f(&mut self.write());

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = entity_id
        );
        value
    }

    // ===== Deployments =====

    /// Create a deployment with no resources
    pub fn create_deployment(&self, name: impl Into<String>) -> Deployment {
        self.create_deployment_builder().name(name).deploy()
    }

    /// Start building a deployment with resources
    pub fn create_deployment_builder(&self) -> DeploymentBuilder<'_> {
        DeploymentBuilder {
            service: self,
            name: String::new(),
            resources: Vec::new(),
        }
    }

    /// # Errors
    /// Returns `DeploymentNotFound` if no deployment has this id.
    pub fn get_deployment(&self, id: &str) -> Result<Deployment> {
        deployment_ops::get_deployment(&self.read(), id).cloned()
    }

    /// Delete a deployment; with `cascade`, also its process definitions
    ///
    /// # Errors
    /// Returns `DeploymentNotFound` if no deployment has this id.
    pub fn delete_deployment(&self, id: &str, cascade: bool) -> Result<()> {
        self.logged("delete_deployment", id, |store| {
            deployment_ops::delete_deployment(store, id, cascade).map(|_| ())
        })
    }

    pub fn list_deployments(&self) -> Vec<Deployment> {
        deployment_ops::list_deployments(&self.read())
            .into_iter()
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns `DeploymentNotFound` if no deployment has this id.
    pub fn get_deployment_resource_names(&self, id: &str) -> Result<Vec<String>> {
        deployment_ops::get_resource_names(&self.read(), id)
    }

    /// # Errors
    /// Returns `DeploymentNotFound` for an unknown deployment and
    /// `ResourceNotFound` for an unknown resource name.
    pub fn get_resource_as_bytes(&self, id: &str, resource_name: &str) -> Result<Vec<u8>> {
        deployment_ops::get_resource_bytes(&self.read(), id, resource_name).map(<[u8]>::to_vec)
    }

    // ===== Process definitions =====

    /// Save a new version of `key` under `deployment_id`
    pub fn save_process_definition(
        &self,
        key: impl Into<String>,
        name: impl Into<String>,
        deployment_id: impl Into<String>,
    ) -> ProcessDefinition {
        let key = key.into();
        log_op_start!("save_process_definition", key = key.as_str());
        let start = Instant::now();

        let definition = definition_ops::save_definition(
            &mut self.write(),
            key,
            name.into(),
            deployment_id.into(),
        );

        log_op_end!(
            "save_process_definition",
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = definition.id.as_str(),
            key = definition.key.as_str(),
            version = definition.version
        );
        definition
    }

    /// # Errors
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn get_process_definition(&self, id: &str) -> Result<ProcessDefinition> {
        definition_ops::get_definition(&self.read(), id).cloned()
    }

    /// Every version of `key`, ascending; empty for an unused key
    pub fn get_process_definitions_by_key(&self, key: &str) -> Vec<ProcessDefinition> {
        definition_ops::get_definitions_by_key(&self.read(), key)
            .into_iter()
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns `ProcessDefinitionKeyNotFound` if no definition carries the key.
    pub fn get_latest_process_definition_by_key(&self, key: &str) -> Result<ProcessDefinition> {
        definition_ops::get_latest_definition_by_key(&self.read(), key).cloned()
    }

    pub fn list_process_definitions(&self) -> Vec<ProcessDefinition> {
        definition_ops::list_definitions(&self.read())
            .into_iter()
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn suspend_process_definition_by_id(&self, id: &str) -> Result<()> {
        self.logged("suspend_process_definition_by_id", id, |store| {
            definition_ops::set_suspended_by_id(store, id, true)
        })
    }

    /// # Errors
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn activate_process_definition_by_id(&self, id: &str) -> Result<()> {
        self.logged("activate_process_definition_by_id", id, |store| {
            definition_ops::set_suspended_by_id(store, id, false)
        })
    }

    /// # Errors
    /// Returns `ProcessDefinitionKeyNotFound` if no definition carries the key.
    pub fn suspend_process_definition_by_key(&self, key: &str) -> Result<()> {
        self.logged("suspend_process_definition_by_key", key, |store| {
            definition_ops::set_suspended_by_key(store, key, true).map(|_| ())
        })
    }

    /// # Errors
    /// Returns `ProcessDefinitionKeyNotFound` if no definition carries the key.
    pub fn activate_process_definition_by_key(&self, key: &str) -> Result<()> {
        self.logged("activate_process_definition_by_key", key, |store| {
            definition_ops::set_suspended_by_key(store, key, false).map(|_| ())
        })
    }

    /// # Errors
    /// Returns `ProcessDefinitionNotFound` if no definition has this id.
    pub fn set_process_definition_category(
        &self,
        id: &str,
        category: impl Into<String>,
    ) -> Result<()> {
        let category = category.into();
        self.logged("set_process_definition_category", id, |store| {
            definition_ops::set_category(store, id, category)
        })
    }

    // ===== Models =====

    pub fn new_model(&self, name: impl Into<String>, key: impl Into<String>) -> Model {
        let key = key.into();
        log_op_start!("new_model", key = key.as_str());
        let start = Instant::now();

        let model = model_ops::new_model(&mut self.write(), name.into(), key);

        log_op_end!(
            "new_model",
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = model.id.as_str()
        );
        model
    }

    /// Upsert: fully replaces the entry with the model's id, or inserts it
    pub fn save_model(&self, model: Model) {
        let id = model.id.clone();
        self.logged_infallible("save_model", &id, |store| model_ops::save_model(store, model));
    }

    /// # Errors
    /// Returns `ModelNotFound` if no model has this id.
    pub fn get_model(&self, id: &str) -> Result<Model> {
        model_ops::get_model(&self.read(), id).cloned()
    }

    /// # Errors
    /// Returns `ModelNotFound` if no model has this id.
    pub fn delete_model(&self, id: &str) -> Result<()> {
        self.logged("delete_model", id, |store| model_ops::delete_model(store, id))
    }

    pub fn list_models(&self) -> Vec<Model> {
        model_ops::list_models(&self.read())
            .into_iter()
            .cloned()
            .collect()
    }

    /// # Errors
    /// Returns `ModelNotFound` if no model has this id.
    pub fn add_model_editor_source(&self, id: &str, source: impl Into<Vec<u8>>) -> Result<()> {
        let source = source.into();
        self.logged("add_model_editor_source", id, |store| {
            model_ops::set_editor_source(store, id, source)
        })
    }

    /// Editor payload of a model; empty if none was added yet
    ///
    /// # Errors
    /// Returns `ModelNotFound` if no model has this id.
    pub fn get_model_editor_source(&self, id: &str) -> Result<Vec<u8>> {
        model_ops::get_editor_source(&self.read(), id).map(<[u8]>::to_vec)
    }
}

/// Collects a deployment's name and resources, then stores it in one write
///
/// # Example
///
/// ```
/// use procrepo_core::RepositoryService;
///
/// let repo = RepositoryService::new();
/// let deployment = repo
///     .create_deployment_builder()
///     .name("invoicing")
///     .add_resource("invoice.bpmn", b"<definitions/>".to_vec())
///     .deploy();
///
/// assert_eq!(
///     repo.get_deployment_resource_names(&deployment.id).unwrap(),
///     vec!["invoice.bpmn"]
/// );
/// ```
#[derive(Debug)]
pub struct DeploymentBuilder<'a> {
    service: &'a RepositoryService,
    name: String,
    resources: Vec<DeploymentResource>,
}

impl DeploymentBuilder<'_> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add a resource; a repeated name replaces the earlier content
    pub fn add_resource(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.resources.push(DeploymentResource::new(name, content));
        self
    }

    /// Store the deployment and return a copy of it
    pub fn deploy(self) -> Deployment {
        let DeploymentBuilder {
            service,
            name,
            resources,
        } = self;

        log_op_start!("create_deployment", name = name.as_str());
        let start = Instant::now();

        let deployment = deployment_ops::deploy(&mut service.write(), name, resources);

        log_op_end!(
            "create_deployment",
            duration_ms = start.elapsed().as_millis() as u64,
            entity_id = deployment.id.as_str()
        );
        deployment
    }
}
