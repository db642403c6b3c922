use procrepo_core_types::RequestId;
use thiserror::Error;

/// Result type alias using RepoError
pub type Result<T> = std::result::Result<T, RepoError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The repository core only ever produces `NotFound` and `ResourceNotFound`.
/// The remaining kinds belong to the outer crates (persistence, engine
/// configuration, CLI input) that share this facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Repository
    NotFound,
    ResourceNotFound,

    // Boundary
    InvalidInput,
    Config,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ResourceNotFound => "ERR_RESOURCE_NOT_FOUND",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling (kind, code) plus
/// context for debugging (operation, entity, request id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    resource_name: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            resource_name: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (deployment, definition, model id or key)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add resource name context
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Tag with the id of the engine session that produced the error
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for both not-found kinds, so callers can map them to a 404
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ExErrorKind::NotFound | ExErrorKind::ResourceNotFound
        )
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(resource_name) = &self.resource_name {
            write!(f, " (resource: {})", resource_name)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors returned by repository operations
///
/// Every variant is a deterministic "no such entry" condition. Creation and
/// save operations cannot fail and do not return this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("Deployment not found: {deployment_id}")]
    DeploymentNotFound { deployment_id: String },

    #[error("Process definition not found: {process_definition_id}")]
    ProcessDefinitionNotFound { process_definition_id: String },

    /// No process definition carries the key (bulk suspend/activate, latest lookup)
    #[error("No process definition with key: {key}")]
    ProcessDefinitionKeyNotFound { key: String },

    #[error("Model not found: {model_id}")]
    ModelNotFound { model_id: String },

    /// The deployment exists but has no resource with this name
    #[error("Resource {resource_name} not found in deployment {deployment_id}")]
    ResourceNotFound {
        deployment_id: String,
        resource_name: String,
    },
}

impl RepoError {
    /// Canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            RepoError::ResourceNotFound { .. } => ExErrorKind::ResourceNotFound,
            _ => ExErrorKind::NotFound,
        }
    }
}

impl From<RepoError> for ExError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match err {
            RepoError::DeploymentNotFound { deployment_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(deployment_id)
                    .with_message(message)
            }
            RepoError::ProcessDefinitionNotFound {
                process_definition_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(process_definition_id)
                .with_message(message),
            RepoError::ProcessDefinitionKeyNotFound { key } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(key)
                    .with_message(message)
            }
            RepoError::ModelNotFound { model_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(model_id)
                .with_message(message),
            RepoError::ResourceNotFound {
                deployment_id,
                resource_name,
            } => ExError::new(ExErrorKind::ResourceNotFound)
                .with_entity_id(deployment_id)
                .with_resource_name(resource_name)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::NotFound,
            ExErrorKind::ResourceNotFound,
            ExErrorKind::InvalidInput,
            ExErrorKind::Config,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_code_and_entity() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("get_model")
            .with_entity_id("m1");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND]"));
        assert!(text.contains("get_model"));
        assert!(text.contains("m1"));
    }

    #[test]
    fn test_resource_not_found_is_distinct_kind() {
        let err = RepoError::ResourceNotFound {
            deployment_id: "d1".to_string(),
            resource_name: "a.bpmn".to_string(),
        };
        assert_eq!(err.kind(), ExErrorKind::ResourceNotFound);

        let ex: ExError = err.into();
        assert!(ex.is_not_found());
        assert_eq!(ex.resource_name(), Some("a.bpmn"));
    }
}
