//! The engine: one repository, optionally backed by a SQLite file

use crate::config::EngineConfig;
use procrepo_core::core_types::RequestId;
use procrepo_core::errors::ExError;
use procrepo_core::logging_facility;
use procrepo_core::RepositoryService;
use procrepo_store::{db, load_store_with_generation, persist_store};
use rusqlite::Connection;

/// Owns the repository service for one configured engine
///
/// Without a database the catalog lives only as long as the engine. With
/// one, the catalog is hydrated on construction and written back by
/// [`Engine::flush`]. A flush fails if another engine has written the same
/// database since this one loaded or last flushed it.
///
/// Each engine gets a fresh `RequestId`; it is logged on start-up and
/// attached to the errors the engine returns.
pub struct Engine {
    config: EngineConfig,
    repository: RepositoryService,
    conn: Option<Connection>,
    generation: i64,
    request_id: RequestId,
}

impl Engine {
    /// Build an engine from its configuration
    ///
    /// Initializes logging with the configured profile (first call in the
    /// process wins), then opens, migrates and loads the database if one is
    /// configured.
    ///
    /// # Errors
    /// * `Persistence` - If the database cannot be opened, migrated or read
    /// * `Serialization` - If a stored row is malformed
    pub fn new(config: EngineConfig) -> Result<Self, ExError> {
        logging_facility::init(config.log_profile);
        let request_id = RequestId::new();

        let (repository, conn, generation) = match &config.database {
            Some(path) => {
                let opened = db::open_and_migrate(path).and_then(|conn| {
                    let (store, generation) = load_store_with_generation(&conn)?;
                    Ok((store, conn, generation))
                });
                let (store, conn, generation) =
                    opened.map_err(|e| e.with_request_id(request_id.clone()))?;
                (RepositoryService::from_store(store), Some(conn), generation)
            }
            None => (RepositoryService::new(), None, 0),
        };

        tracing::info!(
            engine = %config.name,
            request_id = %request_id,
            persistent = conn.is_some(),
            generation,
            deployments = repository.list_deployments().len(),
            "engine started"
        );

        Ok(Self {
            config,
            repository,
            conn,
            generation,
            request_id,
        })
    }

    /// An engine with default configuration and no database
    pub fn in_memory() -> Self {
        Self {
            config: EngineConfig::default(),
            repository: RepositoryService::new(),
            conn: None,
            generation: 0,
            request_id: RequestId::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A handle to the engine's repository; clones share state
    pub fn repository(&self) -> RepositoryService {
        self.repository.clone()
    }

    pub fn is_persistent(&self) -> bool {
        self.conn.is_some()
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Convert an error into an `ExError` tagged with this engine's request id
    pub fn stamp_error(&self, err: impl Into<ExError>) -> ExError {
        err.into().with_request_id(self.request_id.clone())
    }

    /// Write the current catalog to the database
    ///
    /// No-op for an in-memory engine.
    ///
    /// # Errors
    /// * `Persistence` - If another engine wrote the database after this one
    ///   loaded it, or the snapshot cannot be written; the database keeps its
    ///   previous contents either way
    pub fn flush(&mut self) -> Result<(), ExError> {
        let Some(conn) = self.conn.as_mut() else {
            return Ok(());
        };
        self.generation = persist_store(conn, &self.repository.snapshot(), self.generation)
            .map_err(|e| e.with_request_id(self.request_id.clone()))?;
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("persistent", &self.conn.is_some())
            .field("generation", &self.generation)
            .field("request_id", &self.request_id)
            .finish()
    }
}
