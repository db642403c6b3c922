use uuid::Uuid;

use super::store::Store;
use crate::errors::{RepoError, Result};
use crate::model::{Deployment, DeploymentResource};

/// Create a deployment with no resources
///
/// Generates a UUID v7 id and stamps `created_at` with the current time.
///
/// # Returns
/// A copy of the stored deployment
pub fn create_deployment(store: &mut Store, name: String) -> Deployment {
    deploy(store, name, Vec::new())
}

/// Create a deployment together with its resources
///
/// Resources are registered in order; a repeated name keeps the last
/// content at the position of its first occurrence. The deployment is
/// inserted only once fully built.
pub fn deploy(store: &mut Store, name: String, resources: Vec<DeploymentResource>) -> Deployment {
    let mut deployment = Deployment::new(Uuid::now_v7().to_string(), name);
    for resource in resources {
        deployment.put_resource(resource);
    }

    store.insert_deployment(deployment.clone());
    tracing::debug!(
        deployment_id = %deployment.id,
        resources = deployment.resources.len(),
        "deployment stored"
    );

    deployment
}

/// Read a deployment by ID
///
/// # Errors
/// * `DeploymentNotFound` - If the deployment doesn't exist
pub fn get_deployment<'a>(store: &'a Store, id: &str) -> Result<&'a Deployment> {
    store.get_deployment(id)
}

/// Delete a deployment, optionally cascading to its process definitions
///
/// Without `cascade`, definitions owned by the deployment stay in the store
/// and keep pointing at the removed id.
///
/// # Returns
/// The number of process definitions removed by the cascade
///
/// # Errors
/// * `DeploymentNotFound` - If the deployment doesn't exist
pub fn delete_deployment(store: &mut Store, id: &str, cascade: bool) -> Result<usize> {
    if store.deployments.remove(id).is_none() {
        return Err(RepoError::DeploymentNotFound {
            deployment_id: id.to_string(),
        });
    }

    if !cascade {
        return Ok(0);
    }

    let before = store.definitions.len();
    store.definitions.retain(|_, def| def.deployment_id != id);
    let removed = before - store.definitions.len();
    tracing::debug!(deployment_id = id, removed, "cascaded definition delete");

    Ok(removed)
}

/// List all deployments in unspecified order
pub fn list_deployments(store: &Store) -> Vec<&Deployment> {
    store.list_deployments()
}

/// Names of the resources registered with a deployment
///
/// # Errors
/// * `DeploymentNotFound` - If the deployment doesn't exist
pub fn get_resource_names(store: &Store, id: &str) -> Result<Vec<String>> {
    Ok(store.get_deployment(id)?.resource_names())
}

/// Content of one resource of a deployment
///
/// # Errors
/// * `DeploymentNotFound` - If the deployment doesn't exist
/// * `ResourceNotFound` - If the deployment has no resource with this name
pub fn get_resource_bytes<'a>(
    store: &'a Store,
    id: &str,
    resource_name: &str,
) -> Result<&'a [u8]> {
    let deployment = store.get_deployment(id)?;
    deployment
        .resource(resource_name)
        .map(|r| r.content.as_slice())
        .ok_or_else(|| RepoError::ResourceNotFound {
            deployment_id: id.to_string(),
            resource_name: resource_name.to_string(),
        })
}
