//! SQLite repository implementation
//!
//! Writes a `Store` snapshot to the catalog tables

use crate::errors::{from_rusqlite, generation_conflict, Result};
use procrepo_core::model::{Deployment, Model, ProcessDefinition};
use procrepo_core::ops::Store;
use procrepo_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Instant;

/// SQLite repository for deployments, definitions and models
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert a deployment row and its resource rows within a transaction
    pub fn persist_deployment_tx(tx: &Transaction, deployment: &Deployment) -> Result<()> {
        tx.execute(
            "INSERT INTO deployments (id, name, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                deployment.id,
                deployment.name,
                deployment.created_at.to_rfc3339(),
            ],
        )
        .map_err(from_rusqlite)?;

        for (ordinal, resource) in deployment.resources.iter().enumerate() {
            tx.execute(
                "INSERT INTO deployment_resources (deployment_id, name, ordinal, content)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![deployment.id, resource.name, ordinal as i64, resource.content],
            )
            .map_err(from_rusqlite)?;
        }

        Ok(())
    }

    /// Insert a process definition row within a transaction
    pub fn persist_definition_tx(tx: &Transaction, definition: &ProcessDefinition) -> Result<()> {
        tx.execute(
            "INSERT INTO process_definitions (id, key, name, version, category, deployment_id, suspended)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                definition.id,
                definition.key,
                definition.name,
                definition.version,
                definition.category,
                definition.deployment_id,
                definition.suspended,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Insert a model row within a transaction
    pub fn persist_model_tx(tx: &Transaction, model: &Model) -> Result<()> {
        tx.execute(
            "INSERT INTO models (id, name, key, category, version, meta_info, editor_source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                model.id,
                model.name,
                model.key,
                model.category,
                model.version,
                model.meta_info,
                model.editor_source,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Remove every catalog row within a transaction
    pub fn clear_tx(tx: &Transaction) -> Result<()> {
        tx.execute_batch(
            "DELETE FROM deployment_resources;
             DELETE FROM deployments;
             DELETE FROM process_definitions;
             DELETE FROM models;",
        )
        .map_err(from_rusqlite)
    }
}

/// Replace the database contents with a full snapshot of `store`
///
/// Runs in one immediate transaction: either every collection is written or
/// the database is left as it was. Rows absent from the snapshot are
/// removed, so deletes made in memory persist.
///
/// `expected_generation` is the catalog generation the snapshot was loaded
/// at (see [`read_generation`]). The write is refused if another writer has
/// persisted since then.
///
/// # Returns
/// The new generation, to pass to the next call
///
/// # Errors
/// * `Persistence` - If the stored generation differs from
///   `expected_generation`, or any statement fails; the transaction is
///   rolled back
pub fn persist_store(
    conn: &mut Connection,
    store: &Store,
    expected_generation: i64,
) -> Result<i64> {
    log_op_start!("persist_store", generation = expected_generation);
    let start = Instant::now();

    let result = write_snapshot(conn, store, expected_generation);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(generation) => {
            log_op_end!(
                "persist_store",
                duration_ms = duration_ms,
                generation = *generation
            );
        }
        Err(e) => {
            log_op_error!("persist_store", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// Current catalog generation; 0 for a freshly migrated database
pub fn read_generation(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT generation FROM catalog_meta WHERE id = 1",
        [],
        |row| row.get(0),
    )
    .map_err(from_rusqlite)
}

fn write_snapshot(conn: &mut Connection, store: &Store, expected_generation: i64) -> Result<i64> {
    // IMMEDIATE takes the write lock before the generation is read
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let found = read_generation(&tx)?;
    if found != expected_generation {
        return Err(generation_conflict(expected_generation, found));
    }

    SqliteRepo::clear_tx(&tx)?;

    for deployment in store.list_deployments() {
        SqliteRepo::persist_deployment_tx(&tx, deployment)?;
    }
    for definition in store.list_definitions() {
        SqliteRepo::persist_definition_tx(&tx, definition)?;
    }
    for model in store.list_models() {
        SqliteRepo::persist_model_tx(&tx, model)?;
    }

    let generation = found + 1;
    tx.execute(
        "UPDATE catalog_meta SET generation = ?1 WHERE id = 1",
        [generation],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;
    tracing::debug!(
        deployments = store.list_deployments().len(),
        definitions = store.list_definitions().len(),
        models = store.list_models().len(),
        generation,
        "snapshot persisted"
    );

    Ok(generation)
}
