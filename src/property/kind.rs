use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural type of a mapping property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    /// Resolves a schema `type` keyword. `number` is folded into `Integer`.
    pub fn from_schema_type(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PropertyType::String),
            "integer" | "number" => Some(PropertyType::Integer),
            "boolean" => Some(PropertyType::Boolean),
            "array" => Some(PropertyType::Array),
            "object" => Some(PropertyType::Object),
            _ => None,
        }
    }

    /// Infers the type of a literal, used for user-added custom properties.
    pub fn of_literal(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(_) => PropertyType::Integer,
            serde_json::Value::Bool(_) => PropertyType::Boolean,
            serde_json::Value::Array(_) => PropertyType::Array,
            serde_json::Value::Object(_) => PropertyType::Object,
            serde_json::Value::String(_) | serde_json::Value::Null => PropertyType::String,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, PropertyType::Object)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Boolean => "boolean",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an input property's literal `value` is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// The literal is the value; no connection is needed.
    Static,
    /// The literal is a fallback used when the connected source yields nothing.
    Default,
}

/// Which schema a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoSide {
    /// The consuming node's schema.
    Input,
    /// The producing node's schema.
    Output,
}

impl IoSide {
    pub fn opposite(&self) -> Self {
        match self {
            IoSide::Input => IoSide::Output,
            IoSide::Output => IoSide::Input,
        }
    }
}

impl fmt::Display for IoSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoSide::Input => write!(f, "input"),
            IoSide::Output => write!(f, "output"),
        }
    }
}
