use super::definition::SocketSchema;
use crate::error::SchemaConversionError;

/// A trait for socket payloads that can be converted into a `SocketSchema`.
///
/// Schema registries rarely agree on an envelope format. Implementing this
/// trait on your own response structs lets the compiler consume them without
/// an intermediate JSON round-trip.
///
/// # Example
///
/// ```rust,no_run
/// use schemap::prelude::*;
/// use schemap::error::SchemaConversionError;
///
/// struct RegistrySocket { key: String, structure: Option<serde_json::Value> }
///
/// impl IntoSocketSchema for RegistrySocket {
///     fn into_socket_schema(self) -> std::result::Result<SocketSchema, SchemaConversionError> {
///         let schema = self
///             .structure
///             .ok_or_else(|| SchemaConversionError::MissingSchema(self.key.clone()))?;
///         Ok(SocketSchema::new(self.key, schema))
///     }
/// }
/// ```
pub trait IntoSocketSchema {
    /// Consumes the payload and converts it into a socket schema.
    fn into_socket_schema(self) -> Result<SocketSchema, SchemaConversionError>;
}

impl IntoSocketSchema for SocketSchema {
    fn into_socket_schema(self) -> Result<SocketSchema, SchemaConversionError> {
        Ok(self)
    }
}
