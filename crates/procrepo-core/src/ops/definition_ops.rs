use uuid::Uuid;

use super::store::Store;
use crate::errors::{RepoError, Result};
use crate::model::ProcessDefinition;

/// Save a new process definition under a deployment
///
/// The version is one above the highest version already stored for `key`,
/// or 1 for a new key. Versions saturate at `u32::MAX`. `deployment_id` is
/// recorded as given; it is not checked against the stored deployments.
///
/// # Returns
/// A copy of the stored definition
pub fn save_definition(
    store: &mut Store,
    key: String,
    name: String,
    deployment_id: String,
) -> ProcessDefinition {
    let version = store
        .max_version_for_key(&key)
        .map_or(1, |v| v.saturating_add(1));
    let definition = ProcessDefinition::new(
        Uuid::now_v7().to_string(),
        key,
        name,
        version,
        deployment_id,
    );

    store.insert_definition(definition.clone());
    tracing::debug!(
        process_definition_id = %definition.id,
        key = %definition.key,
        version,
        "process definition stored"
    );

    definition
}

/// Read a process definition by ID
///
/// # Errors
/// * `ProcessDefinitionNotFound` - If the definition doesn't exist
pub fn get_definition<'a>(store: &'a Store, id: &str) -> Result<&'a ProcessDefinition> {
    store.get_definition(id)
}

/// All versions sharing `key`, sorted by ascending version
///
/// Returns an empty vector for an unused key.
pub fn get_definitions_by_key<'a>(store: &'a Store, key: &str) -> Vec<&'a ProcessDefinition> {
    let mut defs: Vec<&ProcessDefinition> = store
        .definitions
        .values()
        .filter(|d| d.key == key)
        .collect();
    defs.sort_by_key(|d| d.version);
    defs
}

/// Highest version stored for `key`
///
/// # Errors
/// * `ProcessDefinitionKeyNotFound` - If no definition carries the key
pub fn get_latest_definition_by_key<'a>(
    store: &'a Store,
    key: &str,
) -> Result<&'a ProcessDefinition> {
    store
        .definitions
        .values()
        .filter(|d| d.key == key)
        .max_by_key(|d| d.version)
        .ok_or_else(|| RepoError::ProcessDefinitionKeyNotFound {
            key: key.to_string(),
        })
}

/// List all process definitions in unspecified order
pub fn list_definitions(store: &Store) -> Vec<&ProcessDefinition> {
    store.list_definitions()
}

/// Set the suspended flag on one definition
///
/// Idempotent: setting the current value again succeeds.
///
/// # Errors
/// * `ProcessDefinitionNotFound` - If the definition doesn't exist
pub fn set_suspended_by_id(store: &mut Store, id: &str, suspended: bool) -> Result<()> {
    store.get_definition_mut(id)?.suspended = suspended;
    Ok(())
}

/// Set the suspended flag on every definition sharing `key`
///
/// # Returns
/// The number of definitions updated
///
/// # Errors
/// * `ProcessDefinitionKeyNotFound` - If no definition carries the key;
///   nothing is modified in that case
pub fn set_suspended_by_key(store: &mut Store, key: &str, suspended: bool) -> Result<usize> {
    let mut matched = 0;
    for def in store.definitions.values_mut().filter(|d| d.key == key) {
        def.suspended = suspended;
        matched += 1;
    }

    if matched == 0 {
        return Err(RepoError::ProcessDefinitionKeyNotFound {
            key: key.to_string(),
        });
    }

    Ok(matched)
}

/// Overwrite a definition's category
///
/// # Errors
/// * `ProcessDefinitionNotFound` - If the definition doesn't exist
pub fn set_category(store: &mut Store, id: &str, category: String) -> Result<()> {
    store.get_definition_mut(id)?.category = Some(category);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_increase_per_key() {
        let mut store = Store::new();
        let v1 = save_definition(&mut store, "k".into(), "K".into(), "dep".into());
        let other = save_definition(&mut store, "j".into(), "J".into(), "dep".into());
        let v2 = save_definition(&mut store, "k".into(), "K".into(), "dep".into());

        assert_eq!(v1.version, 1);
        assert_eq!(other.version, 1);
        assert_eq!(v2.version, 2);
    }

    #[test]
    fn test_version_saturates_at_max() {
        let mut store = Store::new();
        store.insert_definition(ProcessDefinition::new(
            "loaded".into(),
            "k".into(),
            "K".into(),
            u32::MAX,
            "dep".into(),
        ));

        let next = save_definition(&mut store, "k".into(), "K".into(), "dep".into());

        assert_eq!(next.version, u32::MAX);
        assert_eq!(get_definitions_by_key(&store, "k").len(), 2);
    }

    #[test]
    fn test_by_key_sorted_by_version() {
        let mut store = Store::new();
        for _ in 0..3 {
            save_definition(&mut store, "k".into(), "K".into(), "dep".into());
        }

        let versions: Vec<u32> = get_definitions_by_key(&store, "k")
            .iter()
            .map(|d| d.version)
            .collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert!(get_definitions_by_key(&store, "unused").is_empty());
    }

    #[test]
    fn test_suspend_by_key_missing_key() {
        let mut store = Store::new();
        save_definition(&mut store, "k".into(), "K".into(), "dep".into());

        let result = set_suspended_by_key(&mut store, "nope", true);
        assert!(matches!(
            result,
            Err(RepoError::ProcessDefinitionKeyNotFound { .. })
        ));
        assert!(store.list_definitions().iter().all(|d| !d.suspended));
    }

    #[test]
    fn test_set_category_accepts_empty() {
        let mut store = Store::new();
        let def = save_definition(&mut store, "k".into(), "K".into(), "dep".into());

        set_category(&mut store, &def.id, String::new()).unwrap();
        assert_eq!(
            store.get_definition(&def.id).unwrap().category.as_deref(),
            Some("")
        );
    }
}
