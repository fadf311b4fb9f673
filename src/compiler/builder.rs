use crate::property::{PropertyDescriptor, PropertyType, join_path};
use crate::schema::SchemaNode;
use itertools::Itertools;

/// Builds the descriptor tree for one schema level at a time.
pub(super) struct PropertyBuilder;

impl PropertyBuilder {
    /// Builds the descriptors of every property declared at `node`'s level.
    /// Objects are moved after their scalar siblings; order is otherwise kept.
    pub(super) fn build_level(
        node: SchemaNode<'_>,
        parent_path: Option<&str>,
        nesting_level: usize,
    ) -> Vec<PropertyDescriptor> {
        let required = node.required();
        node.properties()
            .into_iter()
            .map(|(name, sub)| {
                Self::build_property(
                    name,
                    sub,
                    parent_path,
                    nesting_level,
                    required.contains(&name),
                )
            })
            .sorted_by_key(PropertyDescriptor::is_object)
            .collect()
    }

    fn build_property(
        name: &str,
        node: SchemaNode<'_>,
        parent_path: Option<&str>,
        nesting_level: usize,
        required: bool,
    ) -> PropertyDescriptor {
        let path = join_path(parent_path, name);
        let property_type = Self::resolve_type(node);

        let mut property = PropertyDescriptor::new(name, path, property_type, nesting_level)
            .with_required(required);
        property.enum_values = node.enum_values();
        property.default = node.default_value();
        property.description = node.description();

        if property_type.is_object() {
            let nested = Self::build_level(node, Some(&property.path), nesting_level + 1);
            property.nested_properties = Some(nested);
        }
        property
    }

    /// Falls back to `object` when only `properties` is present, and to a
    /// `string` leaf when the type is missing or unknown.
    fn resolve_type(node: SchemaNode<'_>) -> PropertyType {
        match node.schema_type().and_then(PropertyType::from_schema_type) {
            Some(property_type) => property_type,
            None if node.has_properties() => PropertyType::Object,
            None => PropertyType::String,
        }
    }
}
