//! Requiredness and literal type checks for input property trees.

use crate::connection::ConnectionStore;
use crate::property::{PropertyDescriptor, PropertyTrees, PropertyType, ValueType, flatten};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Why a property failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueReason {
    /// The property's own literal does not fit its type or enum.
    LiteralTypeMismatch,
    /// Required, with no connection, static value, or usable default.
    MissingSource,
    /// A default value only applies on top of a connection.
    DefaultWithoutConnection,
    /// The connected producer is missing or carries an invalid literal.
    InvalidSource,
}

/// A single failing property, for re-surfacing to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub reason: IssueReason,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            IssueReason::LiteralTypeMismatch => "value does not match the property type",
            IssueReason::MissingSource => "required property has no source",
            IssueReason::DefaultWithoutConnection => "default value requires a connection",
            IssueReason::InvalidSource => "connected source is invalid",
        };
        write!(f, "{}: {}", self.path, reason)
    }
}

/// Checks whether a literal can be assigned to a property of type `property_type`.
///
/// Objects can never be entered as literals.
pub fn is_valid_type(value: &Value, property_type: PropertyType) -> bool {
    match property_type {
        PropertyType::Integer => match value {
            Value::Number(_) => true,
            Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
            _ => false,
        },
        PropertyType::Boolean => match value {
            Value::Bool(_) => true,
            Value::String(s) => s == "true" || s == "false",
            _ => false,
        },
        PropertyType::String => value.is_string(),
        PropertyType::Array => match value {
            Value::Array(_) => true,
            Value::String(s) => serde_json::from_str::<Vec<Value>>(&format!("[{}]", s)).is_ok(),
            _ => false,
        },
        PropertyType::Object => false,
    }
}

/// Type check plus `enum` membership, when the property declares one.
pub fn is_valid_literal(property: &PropertyDescriptor, value: &Value) -> bool {
    if !is_valid_type(value, property.property_type) {
        return false;
    }
    match &property.enum_values {
        Some(allowed) => allowed.contains(value),
        None => true,
    }
}

/// Evaluates input properties against the current connections.
pub struct Validator<'a> {
    store: &'a ConnectionStore,
    trees: PropertyTrees<'a>,
}

impl<'a> Validator<'a> {
    pub fn new(store: &'a ConnectionStore, trees: PropertyTrees<'a>) -> Self {
        Self { store, trees }
    }

    pub fn is_property_valid(&self, property: &PropertyDescriptor) -> bool {
        self.check(property).is_none()
    }

    /// Every property at every level must pass. Stops at the first failure.
    pub fn are_properties_valid(&self, properties: &[PropertyDescriptor]) -> bool {
        flatten(properties)
            .into_iter()
            .all(|property| self.is_property_valid(property))
    }

    /// Lists every failing property, in tree order.
    pub fn collect_issues(&self, properties: &[PropertyDescriptor]) -> Vec<ValidationIssue> {
        flatten(properties)
            .into_iter()
            .filter_map(|property| {
                self.check(property).map(|reason| ValidationIssue {
                    path: property.path.clone(),
                    reason,
                })
            })
            .collect()
    }

    fn check(&self, property: &PropertyDescriptor) -> Option<IssueReason> {
        // Validity of objects is decided by their leaves.
        if property.is_object() {
            return None;
        }
        if property.is_validation_error {
            return Some(IssueReason::LiteralTypeMismatch);
        }
        if !property.required {
            return None;
        }

        if property.value_type == Some(ValueType::Static)
            && property
                .value
                .as_ref()
                .is_some_and(|value| is_valid_type(value, property.property_type))
        {
            return None;
        }

        let Some(connection) = self.store.source_of(&property.path) else {
            return Some(match property.value_type {
                Some(ValueType::Default) => IssueReason::DefaultWithoutConnection,
                Some(ValueType::Static) => IssueReason::LiteralTypeMismatch,
                None => IssueReason::MissingSource,
            });
        };
        // The fallback covers whatever the connected source fails to deliver.
        if property.value_type == Some(ValueType::Default) {
            return None;
        }

        let source = self
            .trees
            .output(&connection.output_path, connection.output_is_custom);
        match source {
            // Custom literals carry their own type check in the flag.
            Some(source) if !source.is_validation_error => None,
            _ => Some(IssueReason::InvalidSource),
        }
    }
}
