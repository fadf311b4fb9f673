use crate::property::IoSide;
use crate::validation::ValidationIssue;
use thiserror::Error;

/// Errors raised by a mapping session or the mapping serializer.
#[derive(Error, Debug, Clone)]
pub enum MappingError {
    /// At least one required input property is unsatisfied. Nothing was serialized.
    #[error("Mapping is invalid")]
    InvalidMapping { issues: Vec<ValidationIssue> },

    #[error("No {side} property found at path '{path}'")]
    PropertyNotFound { side: IoSide, path: String },

    #[error("No connection is being dragged")]
    NoActivePick,

    #[error("A custom property at path '{0}' already exists")]
    DuplicateCustomProperty(String),
}

/// Errors that can occur while loading or saving a `MappingSpecification`.
#[derive(Error, Debug)]
pub enum SpecificationError {
    #[error("Failed to parse mapping JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Could not access file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Target path '{0}' is written by more than one mapping or custom field")]
    DuplicateTarget(String),
}

/// Errors that can occur when converting a custom socket payload into a `SocketSchema`.
#[derive(Error, Debug, Clone)]
pub enum SchemaConversionError {
    #[error("Socket '{0}' has no schema")]
    MissingSchema(String),

    #[error("Invalid socket payload: {0}")]
    ValidationError(String),
}
