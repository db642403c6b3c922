//! Engine configuration loaded from TOML

use procrepo_core::errors::{ExError, ExErrorKind};
use procrepo_core::logging_facility::Profile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Engine settings
///
/// Every field has a default, so an empty TOML document is a valid config.
///
/// ```toml
/// name = "billing"
/// database = "/var/lib/procrepo/billing.db"
/// log_profile = "production"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine name, used in log output
    pub name: String,
    /// SQLite file backing the repository; in-memory only when unset
    pub database: Option<PathBuf>,
    pub log_profile: Profile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            database: None,
            log_profile: Profile::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from TOML text
    ///
    /// # Errors
    /// * `Config` - If the text is not valid TOML or has unknown fields
    pub fn from_toml_str(contents: &str) -> Result<Self, ExError> {
        toml::from_str(contents).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(e.to_string())
        })
    }

    /// Read and parse a TOML config file
    ///
    /// # Errors
    /// * `Io` - If the file cannot be read
    /// * `Config` - If its contents do not parse
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&contents)
    }

    /// Builder-style override of the database path
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }
}
