use crate::property::{IoSide, PropertyDescriptor};
use serde::{Deserialize, Serialize};

/// Unique identifier for a connection
pub type ConnectionId = String;

/// A link from an output (or custom) property to an input property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConnection {
    pub id: ConnectionId,
    pub output_path: String,
    /// The producer is a user-added literal rather than a schema property.
    pub output_is_custom: bool,
    pub input_path: String,
    /// False while the connection is being dragged to a new input.
    pub is_existing: bool,
    /// Preview link; never persisted or validated.
    pub is_pseudo_connection: bool,
}

impl MappingConnection {
    pub fn new(output: &PropertyDescriptor, input: &PropertyDescriptor) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            output_path: output.path.clone(),
            output_is_custom: output.is_custom,
            input_path: input.path.clone(),
            is_existing: true,
            is_pseudo_connection: false,
        }
    }

    pub fn pseudo(output: &PropertyDescriptor, input: &PropertyDescriptor) -> Self {
        Self {
            is_pseudo_connection: true,
            ..Self::new(output, input)
        }
    }

    /// An existing, non-preview connection.
    pub fn is_real(&self) -> bool {
        self.is_existing && !self.is_pseudo_connection
    }

    /// Whether this connection ends at `path` on `side`.
    /// Custom producers only match `query_custom`, never the output side.
    pub fn touches(&self, side: IoSide, path: &str) -> bool {
        match side {
            IoSide::Input => self.input_path == path,
            IoSide::Output => !self.output_is_custom && self.output_path == path,
        }
    }
}

/// The drag currently in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConnection {
    /// Side of the fixed endpoint.
    pub side: IoSide,
    pub path: String,
    pub is_custom: bool,
    /// Set when picking an already-connected input reopened its connection.
    pub reopened: Option<ConnectionId>,
    /// Last pointer position. Transient; never persisted.
    pub pointer: Option<(f64, f64)>,
}
