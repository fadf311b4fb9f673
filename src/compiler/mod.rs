use crate::mapping::MappingSpecification;
use crate::property::{IoSide, PropertyDescriptor, duplicate_paths};
use crate::schema::{ANY_DATA_SOCKET_ID, SocketSchema};

mod builder;

use builder::PropertyBuilder;

/// Compiles a socket's structural schema into a tree of `PropertyDescriptor`s.
pub struct SchemaCompiler<'a> {
    socket: &'a SocketSchema,
    any_data_socket_id: String,
    existing_mapping: Option<&'a MappingSpecification>,
}

pub struct SchemaCompilerBuilder<'a> {
    socket: &'a SocketSchema,
    any_data_socket_id: String,
    existing_mapping: Option<&'a MappingSpecification>,
}

impl<'a> SchemaCompilerBuilder<'a> {
    pub fn new(socket: &'a SocketSchema) -> Self {
        Self {
            socket,
            any_data_socket_id: ANY_DATA_SOCKET_ID.to_string(),
            existing_mapping: None,
        }
    }

    /// Overrides the id of the wildcard socket.
    pub fn with_any_data_socket(mut self, socket_id: &str) -> Self {
        self.any_data_socket_id = socket_id.to_string();
        self
    }

    /// Attaches the static and default literals of a previously saved mapping.
    pub fn with_existing_mapping(mut self, mapping: &'a MappingSpecification) -> Self {
        self.existing_mapping = Some(mapping);
        self
    }

    pub fn build(self) -> SchemaCompiler<'a> {
        SchemaCompiler {
            socket: self.socket,
            any_data_socket_id: self.any_data_socket_id,
            existing_mapping: self.existing_mapping,
        }
    }
}

impl<'a> SchemaCompiler<'a> {
    pub fn builder(socket: &'a SocketSchema) -> SchemaCompilerBuilder<'a> {
        SchemaCompilerBuilder::new(socket)
    }

    /// Compiles the schema for one side of the mapping.
    ///
    /// Never fails: malformed sub-schemas degrade to leaf descriptors.
    /// Persisted literals are only attached on the input side.
    pub fn compile(&self, side: IoSide) -> Vec<PropertyDescriptor> {
        let mut properties = PropertyBuilder::build_level(self.socket.root(), None, 0);

        for path in duplicate_paths(&properties) {
            log::warn!(
                "Socket '{}' compiles more than one property to path '{}'",
                self.socket.id,
                path
            );
        }

        if self.socket.id == self.any_data_socket_id {
            for property in properties.iter_mut() {
                property.is_any_data = true;
            }
        }

        if let (IoSide::Input, Some(existing)) = (side, self.existing_mapping) {
            attach_values(&mut properties, existing);
        }

        log::debug!(
            "Compiled {} top-level {} properties for socket '{}'",
            properties.len(),
            side,
            self.socket.id
        );
        properties
    }
}

/// Compiles `socket` with the default any-data socket id and no persisted values.
pub fn compile(socket: &SocketSchema, side: IoSide) -> Vec<PropertyDescriptor> {
    SchemaCompiler::builder(socket).build().compile(side)
}

fn attach_values(properties: &mut [PropertyDescriptor], existing: &MappingSpecification) {
    for property in properties.iter_mut() {
        let static_value = existing.static_value(&property.path);
        let default_value = existing.default_value(&property.path);

        match (static_value, default_value) {
            (Some(value), conflicting) => {
                if conflicting.is_some() {
                    log::warn!(
                        "Property '{}' has both a static and a default value; keeping the static one",
                        property.path
                    );
                }
                property.set_static_value(value.clone());
            }
            (None, Some(value)) => property.set_default_value(value.clone()),
            (None, None) => {}
        }

        if let Some(nested) = property.nested_properties.as_mut() {
            attach_values(nested, existing);
        }
    }
}
