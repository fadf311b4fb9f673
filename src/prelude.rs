//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the schemap crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemap::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let input = SocketSchema::from_json(&std::fs::read_to_string("path/to/input-socket.json")?)?;
//! let output = SocketSchema::from_json(&std::fs::read_to_string("path/to/output-socket.json")?)?;
//!
//! let mut session = MappingSession::default();
//! session.open(input, output, None);
//! session.connect_all();
//!
//! let spec = session.create_mapping()?;
//! spec.save("path/to/mapping.json")?;
//! # Ok(())
//! # }
//! ```

// Session and its building blocks
pub use crate::compatibility::is_compatible;
pub use crate::compiler::{SchemaCompiler, compile};
pub use crate::connection::{
    ConnectionEvent, ConnectionId, ConnectionStore, EventSink, MappingConnection, NullEventSink,
    VecEventSink,
};
pub use crate::session::{MappingSession, MappingSessionBuilder};
pub use crate::validation::{IssueReason, ValidationIssue, Validator, is_valid_type};

// Data model
pub use crate::mapping::{FieldValue, MappingEntry, MappingSerializer, MappingSpecification};
pub use crate::property::{IoSide, PropertyDescriptor, PropertyTrees, PropertyType, ValueType};
pub use crate::schema::{ANY_DATA_SOCKET_ID, IntoSocketSchema, SocketSchema};

// Error types
pub use crate::error::{MappingError, SchemaConversionError, SpecificationError};

// Formatting
pub use crate::display::TreeFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
