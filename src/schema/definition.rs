use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Id of the wildcard socket that accepts any data.
pub const ANY_DATA_SOCKET_ID: &str = "any-data";

/// A socket together with the structural schema it exposes.
/// This is the canonical input of the schema compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketSchema {
    #[serde(alias = "socketId")]
    pub id: String,
    #[serde(alias = "structure")]
    pub schema: Value,
}

impl SocketSchema {
    pub fn new(id: impl Into<String>, schema: Value) -> Self {
        Self {
            id: id.into(),
            schema,
        }
    }

    /// Parses a socket from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn root(&self) -> SchemaNode<'_> {
        SchemaNode::new(&self.schema)
    }
}

/// A lenient, read-only view over one level of a JSON-schema-like value.
///
/// Every accessor tolerates malformed input and reports "absent" instead
/// of failing.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode<'a> {
    raw: &'a Value,
}

impl<'a> SchemaNode<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn schema_type(&self) -> Option<&'a str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    /// Sub-schemas in document order. Empty when `properties` is missing or not an object.
    pub fn properties(&self) -> Vec<(&'a str, SchemaNode<'a>)> {
        self.raw
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, sub)| (name.as_str(), SchemaNode::new(sub)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_properties(&self) -> bool {
        self.raw
            .get("properties")
            .and_then(Value::as_object)
            .is_some()
    }

    /// This level's own `required` list; non-string entries are ignored.
    pub fn required(&self) -> Vec<&'a str> {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn enum_values(&self) -> Option<Vec<Value>> {
        self.raw.get("enum").and_then(Value::as_array).cloned()
    }

    pub fn default_value(&self) -> Option<Value> {
        self.raw.get("default").cloned()
    }

    pub fn description(&self) -> Option<String> {
        self.raw
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
