use super::specification::{FieldValue, MappingEntry, MappingSpecification};
use crate::connection::ConnectionStore;
use crate::error::MappingError;
use crate::property::{PropertyTrees, ValueType, flatten};
use crate::validation::Validator;
use serde_json::Value;

/// Turns the final connection and value state into a `MappingSpecification`.
pub struct MappingSerializer<'a> {
    store: &'a ConnectionStore,
    trees: PropertyTrees<'a>,
}

impl<'a> MappingSerializer<'a> {
    pub fn new(store: &'a ConnectionStore, trees: PropertyTrees<'a>) -> Self {
        Self { store, trees }
    }

    /// Serializes the session, or fails without producing anything when
    /// any input property is unsatisfied.
    pub fn serialize(&self) -> Result<MappingSpecification, MappingError> {
        let validator = Validator::new(self.store, self.trees);
        if !validator.are_properties_valid(self.trees.input) {
            return Err(MappingError::InvalidMapping {
                issues: validator.collect_issues(self.trees.input),
            });
        }

        let mut spec = MappingSpecification::default();

        for connection in self.store.real_connections() {
            let source = self
                .trees
                .output(&connection.output_path, connection.output_is_custom);
            let (Some(source), Some(input)) = (source, self.trees.input(&connection.input_path))
            else {
                log::warn!(
                    "Skipping dangling connection {} ({} -> {})",
                    connection.id,
                    connection.output_path,
                    connection.input_path
                );
                continue;
            };

            if source.is_custom {
                spec.custom_fields.push(FieldValue {
                    to: input.path.clone(),
                    value: source.value.clone().unwrap_or(Value::Null),
                });
            } else {
                let default_value = match input.value_type {
                    Some(ValueType::Default) => input.value.clone(),
                    _ => None,
                };
                spec.mapping.push(MappingEntry {
                    from: source.path.clone(),
                    to: input.path.clone(),
                    default_value,
                });
            }
        }

        spec.static_fields = flatten(self.trees.input)
            .into_iter()
            .filter(|property| property.value_type == Some(ValueType::Static))
            .filter_map(|property| {
                property.value.clone().map(|value| FieldValue {
                    to: property.path.clone(),
                    value,
                })
            })
            .collect();

        log::debug!(
            "Serialized mapping: {} mapped, {} custom, {} static",
            spec.mapping.len(),
            spec.custom_fields.len(),
            spec.static_fields.len()
        );
        Ok(spec)
    }
}
