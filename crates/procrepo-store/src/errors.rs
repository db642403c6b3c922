//! Error handling for procrepo-store
//!
//! Wraps procrepo-core ExError with store-specific helpers

use procrepo_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// The catalog was written by someone else since this writer loaded it
pub fn generation_conflict(expected: i64, found: i64) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("persist_store")
        .with_message(format!(
            "Catalog changed since it was loaded: expected generation {}, found {}",
            expected, found
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// A stored row that cannot be turned back into a domain value
pub fn corrupt_row(table: &str, id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("hydrate")
        .with_entity_id(id)
        .with_message(format!("Invalid row in {}: {}", table, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rusqlite_is_persistence() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.op(), Some("sqlite"));
    }

    #[test]
    fn test_generation_conflict_is_persistence() {
        let err = generation_conflict(3, 4);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert!(err.message().contains("expected generation 3, found 4"));
    }

    #[test]
    fn test_checksum_mismatch_names_migration() {
        let err = checksum_mismatch("001_initial_schema", "aa", "bb");
        assert_eq!(err.entity_id(), Some("001_initial_schema"));
        assert!(err.message().contains("expected aa, got bb"));
    }
}
