use super::kind::{PropertyType, ValueType};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Prefix of custom property paths, keeping them apart from schema paths.
pub const CUSTOM_PATH_PREFIX: &str = "$custom:";

/// A single node of a compiled schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub property_name: String,
    /// Dotted path from the schema root. Unique within one side.
    pub path: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub nesting_level: usize,
    pub required: bool,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_any_data: bool,
    pub is_custom: bool,
    /// Present only for `object` properties. Objects sort after scalar siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_properties: Option<Vec<PropertyDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    pub is_validation_error: bool,
}

impl PropertyDescriptor {
    /// Creates a bare leaf descriptor.
    pub fn new(
        property_name: impl Into<String>,
        path: impl Into<String>,
        property_type: PropertyType,
        nesting_level: usize,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            path: path.into(),
            property_type,
            nesting_level,
            required: false,
            enum_values: None,
            default: None,
            description: None,
            is_any_data: false,
            is_custom: false,
            nested_properties: if property_type.is_object() {
                Some(Vec::new())
            } else {
                None
            },
            value: None,
            value_type: None,
            is_validation_error: false,
        }
    }

    /// Creates a user-added literal producer.
    pub fn custom(name: impl Into<String>, property_type: PropertyType, value: Value) -> Self {
        let name = name.into();
        let path = format!("{}{}", CUSTOM_PATH_PREFIX, name);
        let mut property = Self::new(name, path, property_type, 0);
        property.nested_properties = None;
        property.is_custom = true;
        property.value = Some(value);
        property.refresh_validation_flag();
        property
    }

    pub fn is_object(&self) -> bool {
        self.property_type.is_object()
    }

    /// Nested properties, or an empty slice for scalars.
    pub fn children(&self) -> &[PropertyDescriptor] {
        self.nested_properties.as_deref().unwrap_or(&[])
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_nested(mut self, nested: Vec<PropertyDescriptor>) -> Self {
        self.nested_properties = Some(nested);
        self
    }

    /// Marks the property with a literal that replaces any connection.
    pub fn set_static_value(&mut self, value: Value) {
        self.value = Some(value);
        self.value_type = Some(ValueType::Static);
        self.refresh_validation_flag();
    }

    /// Marks the property with a fallback literal used alongside a connection.
    pub fn set_default_value(&mut self, value: Value) {
        self.value = Some(value);
        self.value_type = Some(ValueType::Default);
        self.is_validation_error = false;
    }

    pub fn clear_value(&mut self) {
        self.value = None;
        self.value_type = None;
        self.is_validation_error = false;
    }

    /// Recomputes `is_validation_error` for static and custom literals.
    pub fn refresh_validation_flag(&mut self) {
        let checks_literal = self.is_custom || self.value_type == Some(ValueType::Static);
        self.is_validation_error = match (&self.value, checks_literal) {
            (Some(value), true) => !crate::validation::is_valid_literal(self, value),
            _ => false,
        };
    }
}

/// Joins a parent path and a child name.
pub fn join_path(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{}{}{}", parent, PATH_SEPARATOR, name),
        _ => name.to_string(),
    }
}

/// Depth-first, pre-order traversal of a property tree.
pub fn flatten(properties: &[PropertyDescriptor]) -> Vec<&PropertyDescriptor> {
    let mut out = Vec::new();
    let mut stack: Vec<&PropertyDescriptor> = properties.iter().rev().collect();
    while let Some(property) = stack.pop() {
        out.push(property);
        stack.extend(property.children().iter().rev());
    }
    out
}

/// Paths that occur more than once in a tree, in traversal order.
///
/// Only possible when a property name itself contains the separator.
pub fn duplicate_paths(properties: &[PropertyDescriptor]) -> Vec<&str> {
    let mut seen = AHashSet::new();
    flatten(properties)
        .into_iter()
        .map(|property| property.path.as_str())
        .filter(|path| !seen.insert(*path))
        .collect()
}

/// Finds a property anywhere in a tree by its path.
pub fn find_by_path<'a>(
    properties: &'a [PropertyDescriptor],
    path: &str,
) -> Option<&'a PropertyDescriptor> {
    for property in properties {
        if property.path == path {
            return Some(property);
        }
        if is_ancestor_path(&property.path, path) {
            if let Some(found) = find_by_path(property.children(), path) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable counterpart of [`find_by_path`].
pub fn find_by_path_mut<'a>(
    properties: &'a mut [PropertyDescriptor],
    path: &str,
) -> Option<&'a mut PropertyDescriptor> {
    for property in properties.iter_mut() {
        if property.path == path {
            return Some(property);
        }
        if is_ancestor_path(&property.path, path) {
            if let Some(nested) = property.nested_properties.as_mut() {
                if let Some(found) = find_by_path_mut(nested, path) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn is_ancestor_path(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(PATH_SEPARATOR)
}
