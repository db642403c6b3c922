use uuid::Uuid;

use super::store::Store;
use crate::errors::{RepoError, Result};
use crate::model::Model;

/// Create and store an empty model draft
pub fn new_model(store: &mut Store, name: String, key: String) -> Model {
    let model = Model::new(Uuid::now_v7().to_string(), name, key);
    store.insert_model(model.clone());
    model
}

/// Upsert a model by its own id
///
/// Replaces every field of an existing entry; nothing is merged from the old
/// value. An unknown id is inserted.
pub fn save_model(store: &mut Store, model: Model) {
    store.insert_model(model);
}

/// Read a model by ID
///
/// # Errors
/// * `ModelNotFound` - If the model doesn't exist
pub fn get_model<'a>(store: &'a Store, id: &str) -> Result<&'a Model> {
    store.get_model(id)
}

/// Remove a model
///
/// # Errors
/// * `ModelNotFound` - If the model doesn't exist
pub fn delete_model(store: &mut Store, id: &str) -> Result<()> {
    store
        .models
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| RepoError::ModelNotFound {
            model_id: id.to_string(),
        })
}

pub fn list_models(store: &Store) -> Vec<&Model> {
    store.list_models()
}

/// Overwrite a model's editor payload
///
/// # Errors
/// * `ModelNotFound` - If the model doesn't exist
pub fn set_editor_source(store: &mut Store, id: &str, source: Vec<u8>) -> Result<()> {
    store.get_model_mut(id)?.editor_source = source;
    Ok(())
}

/// A model's editor payload; empty if none was ever added
///
/// # Errors
/// * `ModelNotFound` - If the model doesn't exist
pub fn get_editor_source<'a>(store: &'a Store, id: &str) -> Result<&'a [u8]> {
    Ok(store.get_model(id)?.editor_source.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_model_replaces_all_fields() {
        let mut store = Store::new();
        let mut model = new_model(&mut store, "Draft".into(), "draft".into());
        model.category = "finance".into();
        model.meta_info = r#"{"rev":1}"#.into();
        save_model(&mut store, model.clone());

        let replacement = Model::new(model.id.clone(), "Renamed".into(), "renamed".into());
        save_model(&mut store, replacement);

        let stored = store.get_model(&model.id).unwrap();
        assert_eq!(stored.name, "Renamed");
        assert!(stored.category.is_empty());
        assert!(stored.meta_info.is_empty());
    }

    #[test]
    fn test_editor_source_defaults_to_empty() {
        let mut store = Store::new();
        let model = new_model(&mut store, "Draft".into(), "draft".into());

        assert!(get_editor_source(&store, &model.id).unwrap().is_empty());

        set_editor_source(&mut store, &model.id, b"{}".to_vec()).unwrap();
        assert_eq!(get_editor_source(&store, &model.id).unwrap(), b"{}");
    }

    #[test]
    fn test_delete_model_twice() {
        let mut store = Store::new();
        let model = new_model(&mut store, "Draft".into(), "draft".into());

        delete_model(&mut store, &model.id).unwrap();
        assert!(matches!(
            delete_model(&mut store, &model.id),
            Err(RepoError::ModelNotFound { .. })
        ));
    }
}
