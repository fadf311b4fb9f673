use crate::error::SpecificationError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

/// A direct output-to-input mapping, optionally with a fallback literal.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

/// A literal written to an input path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub to: String,
    pub value: Value,
}

/// The persisted result of a mapping session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MappingSpecification {
    #[serde(default)]
    pub mapping: Vec<MappingEntry>,
    #[serde(default)]
    pub custom_fields: Vec<FieldValue>,
    #[serde(default)]
    pub static_fields: Vec<FieldValue>,
}

impl MappingSpecification {
    pub fn new(
        mapping: Vec<MappingEntry>,
        custom_fields: Vec<FieldValue>,
        static_fields: Vec<FieldValue>,
    ) -> Self {
        Self {
            mapping,
            custom_fields,
            static_fields,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty() && self.custom_fields.is_empty() && self.static_fields.is_empty()
    }

    /// The static literal recorded for `path`, if any.
    pub fn static_value(&self, path: &str) -> Option<&Value> {
        self.static_fields
            .iter()
            .find(|field| field.to == path)
            .map(|field| &field.value)
    }

    /// The fallback literal of the mapping that targets `path`, if any.
    pub fn default_value(&self, path: &str) -> Option<&Value> {
        self.mapping
            .iter()
            .find(|entry| entry.to == path)
            .and_then(|entry| entry.default_value.as_ref())
    }

    /// Checks that every input path has at most one resolved source.
    pub fn check_unique_targets(&self) -> Result<(), SpecificationError> {
        let mut seen = AHashSet::new();
        let targets = self
            .mapping
            .iter()
            .map(|entry| &entry.to)
            .chain(self.custom_fields.iter().map(|field| &field.to));
        for to in targets {
            if !seen.insert(to.as_str()) {
                return Err(SpecificationError::DuplicateTarget(to.clone()));
            }
        }
        Ok(())
    }

    /// Parses a specification from JSON and checks target uniqueness.
    pub fn from_json(json: &str) -> Result<Self, SpecificationError> {
        let spec: Self = serde_json::from_str(json)?;
        spec.check_unique_targets()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> Result<String, SpecificationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Saves the specification to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), SpecificationError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SpecificationError::Io {
            path: path.to_string(),
            source,
        })
    }

    /// Loads a specification from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, SpecificationError> {
        let content = fs::read_to_string(path).map_err(|source| SpecificationError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
