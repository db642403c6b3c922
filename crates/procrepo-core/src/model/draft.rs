use serde::{Deserialize, Serialize};

/// Model - a design-time draft that has not been deployed
///
/// Models have no relationship to deployments or process definitions.
/// `editor_source` is the opaque payload written by a modelling tool.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Model {
    /// Unique identifier (UUID v7)
    pub id: String,
    pub name: String,
    pub key: String,
    pub category: String,
    pub version: u32,
    /// Free-form metadata, usually JSON written by the modeller
    pub meta_info: String,
    /// Empty until an editor source is added
    pub editor_source: Vec<u8>,
}

impl Model {
    pub fn new(id: String, name: String, key: String) -> Self {
        Self {
            id,
            name,
            key,
            ..Self::default()
        }
    }

    pub fn has_editor_source(&self) -> bool {
        !self.editor_source.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_is_empty_draft() {
        let model = Model::new("m-1".to_string(), "Onboarding".to_string(), "onb".to_string());

        assert_eq!(model.name, "Onboarding");
        assert!(model.meta_info.is_empty());
        assert!(model.category.is_empty());
        assert!(!model.has_editor_source());
    }
}
