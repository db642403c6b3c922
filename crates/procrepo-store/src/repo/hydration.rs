//! Hydration layer - loads the catalog from SQLite into a `Store`

use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::repo::sqlite_repo::read_generation;
use chrono::{DateTime, Utc};
use procrepo_core::model::{Deployment, DeploymentResource, Model, ProcessDefinition};
use procrepo_core::ops::Store;
use rusqlite::Connection;
use std::collections::HashMap;

/// Load every deployment, process definition and model into a new `Store`
///
/// # Errors
/// * `Persistence` - If a query fails
/// * `Serialization` - If a stored timestamp cannot be parsed
pub fn load_store(conn: &Connection) -> Result<Store> {
    let mut store = Store::new();

    for deployment in load_deployments(conn)? {
        store.insert_deployment(deployment);
    }
    for definition in load_definitions(conn)? {
        store.insert_definition(definition);
    }
    for model in load_models(conn)? {
        store.insert_model(model);
    }

    tracing::debug!(
        deployments = store.list_deployments().len(),
        definitions = store.list_definitions().len(),
        models = store.list_models().len(),
        "store hydrated"
    );

    Ok(store)
}

/// Load the catalog together with the generation it was read at
///
/// Both are read inside one transaction, so the generation matches the
/// rows. Pass it to `persist_store` when writing the store back.
///
/// # Errors
/// * `Persistence` - If a query fails
/// * `Serialization` - If a stored timestamp cannot be parsed
pub fn load_store_with_generation(conn: &Connection) -> Result<(Store, i64)> {
    let tx = conn.unchecked_transaction().map_err(from_rusqlite)?;
    let generation = read_generation(&tx)?;
    let store = load_store(&tx)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok((store, generation))
}

/// Load all deployments with their resources in registration order
pub fn load_deployments(conn: &Connection) -> Result<Vec<Deployment>> {
    let mut stmt = conn
        .prepare("SELECT id, name, created_at FROM deployments ORDER BY id")
        .map_err(from_rusqlite)?;

    let rows: Vec<(String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut resources = load_resources(conn)?;

    rows.into_iter()
        .map(|(id, name, created_at)| {
            let created_at = parse_timestamp(&created_at)
                .map_err(|reason| corrupt_row("deployments", &id, &reason))?;
            let mut deployment = Deployment::new(id, name);
            deployment.created_at = created_at;
            deployment.resources = resources.remove(&deployment.id).unwrap_or_default();
            Ok(deployment)
        })
        .collect()
}

fn load_resources(conn: &Connection) -> Result<HashMap<String, Vec<DeploymentResource>>> {
    let mut stmt = conn
        .prepare(
            "SELECT deployment_id, name, content FROM deployment_resources
             ORDER BY deployment_id, ordinal",
        )
        .map_err(from_rusqlite)?;

    let rows: Vec<(String, String, Vec<u8>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut by_deployment: HashMap<String, Vec<DeploymentResource>> = HashMap::new();
    for (deployment_id, name, content) in rows {
        by_deployment
            .entry(deployment_id)
            .or_default()
            .push(DeploymentResource::new(name, content));
    }
    Ok(by_deployment)
}

/// Load all process definitions, sorted by key then version
pub fn load_definitions(conn: &Connection) -> Result<Vec<ProcessDefinition>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, key, name, version, category, deployment_id, suspended
             FROM process_definitions ORDER BY key, version",
        )
        .map_err(from_rusqlite)?;

    let definitions = stmt
        .query_map([], |row| {
            let mut definition = ProcessDefinition::new(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(5)?,
            );
            definition.category = row.get(4)?;
            definition.suspended = row.get(6)?;
            Ok(definition)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(definitions)
}

pub fn load_models(conn: &Connection) -> Result<Vec<Model>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, key, category, version, meta_info, editor_source
             FROM models ORDER BY id",
        )
        .map_err(from_rusqlite)?;

    let models = stmt
        .query_map([], |row| {
            Ok(Model {
                id: row.get(0)?,
                name: row.get(1)?,
                key: row.get(2)?,
                category: row.get(3)?,
                version: row.get(4)?,
                meta_info: row.get(5)?,
                editor_source: row.get(6)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(models)
}

fn parse_timestamp(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("bad timestamp {:?}: {}", value, e))
}
