//! One mapping-editing session: both property trees, the custom literals,
//! and the connections between them.
//!
//! A session is single-threaded and synchronous. Opening a new pair of
//! sockets discards all previous state; nothing is reconciled across
//! sessions.

use crate::compatibility::is_compatible;
use crate::compiler::SchemaCompiler;
use crate::connection::{ConnectionId, ConnectionStore, EventSink, MappingConnection};
use crate::display::TreeFormatter;
use crate::error::MappingError;
use crate::mapping::{MappingSerializer, MappingSpecification};
use crate::property::{IoSide, PropertyDescriptor, PropertyTrees, PropertyType, find_by_path_mut};
use crate::schema::{ANY_DATA_SOCKET_ID, SocketSchema};
use crate::validation::{ValidationIssue, Validator};
use serde_json::Value;
use std::sync::Arc;

pub struct MappingSession {
    any_data_socket_id: String,
    input_socket: Option<SocketSchema>,
    output_socket: Option<SocketSchema>,
    input_properties: Vec<PropertyDescriptor>,
    output_properties: Vec<PropertyDescriptor>,
    custom_properties: Vec<PropertyDescriptor>,
    store: ConnectionStore,
}

pub struct MappingSessionBuilder {
    any_data_socket_id: String,
    sink: Option<Arc<dyn EventSink>>,
}

impl Default for MappingSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingSessionBuilder {
    pub fn new() -> Self {
        Self {
            any_data_socket_id: ANY_DATA_SOCKET_ID.to_string(),
            sink: None,
        }
    }

    pub fn with_any_data_socket(mut self, socket_id: &str) -> Self {
        self.any_data_socket_id = socket_id.to_string();
        self
    }

    /// Receives connection change notifications.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> MappingSession {
        let store = match self.sink {
            Some(sink) => ConnectionStore::with_sink(sink),
            None => ConnectionStore::new(),
        };
        MappingSession {
            any_data_socket_id: self.any_data_socket_id,
            input_socket: None,
            output_socket: None,
            input_properties: Vec::new(),
            output_properties: Vec::new(),
            custom_properties: Vec::new(),
            store,
        }
    }
}

impl Default for MappingSession {
    fn default() -> Self {
        MappingSessionBuilder::new().build()
    }
}

impl MappingSession {
    pub fn builder() -> MappingSessionBuilder {
        MappingSessionBuilder::new()
    }

    /// Starts a session between two sockets, restoring a previously saved
    /// mapping when given.
    ///
    /// Persisted entries that name paths missing from the current schemas
    /// are skipped.
    pub fn open(
        &mut self,
        input: SocketSchema,
        output: SocketSchema,
        existing: Option<&MappingSpecification>,
    ) {
        self.store.clear_all();
        self.custom_properties.clear();

        let mut input_compiler =
            SchemaCompiler::builder(&input).with_any_data_socket(&self.any_data_socket_id);
        if let Some(existing) = existing {
            input_compiler = input_compiler.with_existing_mapping(existing);
        }
        self.input_properties = input_compiler.build().compile(IoSide::Input);
        self.output_properties = SchemaCompiler::builder(&output)
            .with_any_data_socket(&self.any_data_socket_id)
            .build()
            .compile(IoSide::Output);
        self.input_socket = Some(input);
        self.output_socket = Some(output);

        if let Some(existing) = existing {
            self.restore_connections(existing);
        }
    }

    fn restore_connections(&mut self, existing: &MappingSpecification) {
        for field in &existing.custom_fields {
            let target_type = self.trees().input(&field.to).map(|input| input.property_type);
            let Some(target_type) = target_type else {
                log::warn!("Skipping custom field for unknown input '{}'", field.to);
                continue;
            };
            let property_type = if target_type.is_object() {
                PropertyType::of_literal(&field.value)
            } else {
                target_type
            };
            let mut property =
                PropertyDescriptor::custom(field.to.clone(), property_type, field.value.clone());
            // Persisted literals are restored as saved; only later edits are re-checked.
            property.is_validation_error = false;
            self.custom_properties.push(property);
        }

        let trees = PropertyTrees::new(
            &self.input_properties,
            &self.output_properties,
            &self.custom_properties,
        );
        for entry in &existing.mapping {
            match (trees.output(&entry.from, false), trees.input(&entry.to)) {
                (Some(output), Some(input)) => {
                    self.store.connect(output, input);
                }
                _ => log::warn!(
                    "Skipping persisted mapping '{}' -> '{}': path not found",
                    entry.from,
                    entry.to
                ),
            }
        }
        // Restored custom properties are named after the input they feed.
        for custom in trees.custom {
            if let Some(input) = trees.input(&custom.property_name) {
                self.store.connect(custom, input);
            }
        }
    }

    /// Recompiles the input side. All connections are discarded.
    pub fn select_input_socket(&mut self, socket: SocketSchema) {
        self.input_properties = SchemaCompiler::builder(&socket)
            .with_any_data_socket(&self.any_data_socket_id)
            .build()
            .compile(IoSide::Input);
        self.input_socket = Some(socket);
        self.store.clear_all();
    }

    /// Recompiles the output side. All connections are discarded.
    pub fn select_output_socket(&mut self, socket: SocketSchema) {
        self.output_properties = SchemaCompiler::builder(&socket)
            .with_any_data_socket(&self.any_data_socket_id)
            .build()
            .compile(IoSide::Output);
        self.output_socket = Some(socket);
        self.store.clear_all();
    }

    pub fn input_socket(&self) -> Option<&SocketSchema> {
        self.input_socket.as_ref()
    }

    pub fn output_socket(&self) -> Option<&SocketSchema> {
        self.output_socket.as_ref()
    }

    pub fn input_properties(&self) -> &[PropertyDescriptor] {
        &self.input_properties
    }

    pub fn output_properties(&self) -> &[PropertyDescriptor] {
        &self.output_properties
    }

    pub fn custom_properties(&self) -> &[PropertyDescriptor] {
        &self.custom_properties
    }

    pub fn store(&self) -> &ConnectionStore {
        &self.store
    }

    pub fn trees(&self) -> PropertyTrees<'_> {
        PropertyTrees::new(
            &self.input_properties,
            &self.output_properties,
            &self.custom_properties,
        )
    }

    /// Looks up a property. Output-side paths may name custom properties.
    pub fn property(
        &self,
        side: IoSide,
        path: &str,
    ) -> Result<&PropertyDescriptor, MappingError> {
        resolve(self.trees(), side, path)
    }

    // --- Interactive connection ---

    pub fn pick(&mut self, side: IoSide, path: &str) -> Result<(), MappingError> {
        let trees = PropertyTrees::new(
            &self.input_properties,
            &self.output_properties,
            &self.custom_properties,
        );
        let property = resolve(trees, side, path)?;
        self.store.pick(property, side);
        Ok(())
    }

    pub fn move_pointer(&mut self, x: f64, y: f64) {
        self.store.move_pointer(x, y);
    }

    /// Whether dropping the pending drag on `path` would form a legal connection.
    pub fn can_connect(&self, side: IoSide, path: &str) -> Result<bool, MappingError> {
        let pending = self.store.pending().ok_or(MappingError::NoActivePick)?;
        if pending.side == side {
            return Ok(false);
        }
        let trees = self.trees();
        let target = resolve(trees, side, path)?;
        let anchor = match pending.side {
            IoSide::Input => trees.input(&pending.path),
            IoSide::Output => trees.output(&pending.path, pending.is_custom),
        }
        .ok_or_else(|| MappingError::PropertyNotFound {
            side: pending.side,
            path: pending.path.clone(),
        })?;

        Ok(match side {
            IoSide::Input => is_compatible(anchor, target),
            IoSide::Output => is_compatible(target, anchor),
        })
    }

    /// Drops the pending drag on `path`. Callers should check
    /// [`can_connect`](Self::can_connect) first.
    pub fn drop_on(
        &mut self,
        side: IoSide,
        path: &str,
    ) -> Result<Vec<ConnectionId>, MappingError> {
        let trees = PropertyTrees::new(
            &self.input_properties,
            &self.output_properties,
            &self.custom_properties,
        );
        let property = resolve(trees, side, path)?;
        self.store.try_connect(side, property, trees)
    }

    pub fn cancel_pick(&mut self) {
        self.store.cancel_pick();
    }

    pub fn remove_connection(&mut self, id: &str) -> Option<MappingConnection> {
        self.store.remove(id)
    }

    /// Connects every compatible same-named pair across both trees.
    pub fn connect_all(&mut self) -> Vec<ConnectionId> {
        let trees = PropertyTrees::new(
            &self.input_properties,
            &self.output_properties,
            &self.custom_properties,
        );
        self.store.connect_all(trees)
    }

    pub fn clear_all(&mut self) {
        self.store.clear_all();
    }

    // --- Custom literals ---

    /// Adds a literal producer and returns its path.
    pub fn add_custom_property(
        &mut self,
        name: &str,
        property_type: PropertyType,
        value: Value,
    ) -> Result<String, MappingError> {
        let property = PropertyDescriptor::custom(name, property_type, value);
        if self
            .custom_properties
            .iter()
            .any(|existing| existing.path == property.path)
        {
            return Err(MappingError::DuplicateCustomProperty(property.path));
        }
        let path = property.path.clone();
        self.custom_properties.push(property);
        Ok(path)
    }

    /// Removes a literal producer together with its connections.
    pub fn remove_custom_property(
        &mut self,
        path: &str,
    ) -> Result<PropertyDescriptor, MappingError> {
        let index = self
            .custom_properties
            .iter()
            .position(|property| property.path == path)
            .ok_or_else(|| MappingError::PropertyNotFound {
                side: IoSide::Output,
                path: path.to_string(),
            })?;
        self.store.remove_custom(path);
        Ok(self.custom_properties.remove(index))
    }

    /// Replaces the literal of a custom property and re-checks it.
    pub fn set_custom_value(&mut self, path: &str, value: Value) -> Result<(), MappingError> {
        let property = self
            .custom_properties
            .iter_mut()
            .find(|property| property.path == path)
            .ok_or_else(|| MappingError::PropertyNotFound {
                side: IoSide::Output,
                path: path.to_string(),
            })?;
        property.value = Some(value);
        property.refresh_validation_flag();
        Ok(())
    }

    // --- Input literals ---

    pub fn set_static_value(&mut self, path: &str, value: Value) -> Result<(), MappingError> {
        self.input_mut(path)?.set_static_value(value);
        Ok(())
    }

    pub fn set_default_value(&mut self, path: &str, value: Value) -> Result<(), MappingError> {
        self.input_mut(path)?.set_default_value(value);
        Ok(())
    }

    pub fn clear_value(&mut self, path: &str) -> Result<(), MappingError> {
        self.input_mut(path)?.clear_value();
        Ok(())
    }

    fn input_mut(&mut self, path: &str) -> Result<&mut PropertyDescriptor, MappingError> {
        find_by_path_mut(&mut self.input_properties, path).ok_or_else(|| {
            MappingError::PropertyNotFound {
                side: IoSide::Input,
                path: path.to_string(),
            }
        })
    }

    // --- Validation and output ---

    pub fn validator(&self) -> Validator<'_> {
        Validator::new(&self.store, self.trees())
    }

    pub fn is_property_valid(&self, path: &str) -> Result<bool, MappingError> {
        let property = resolve(self.trees(), IoSide::Input, path)?;
        Ok(self.validator().is_property_valid(property))
    }

    pub fn is_valid(&self) -> bool {
        self.validator().are_properties_valid(&self.input_properties)
    }

    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        self.validator().collect_issues(&self.input_properties)
    }

    /// Produces the persisted mapping. Fails with "Mapping is invalid" when
    /// any required input is unsatisfied.
    pub fn create_mapping(&self) -> Result<MappingSpecification, MappingError> {
        MappingSerializer::new(&self.store, self.trees()).serialize()
    }

    /// Renders both trees and the custom literals as text.
    pub fn format_tree(&self) -> String {
        let mut output = String::from("--- OUTPUT ---\n");
        output.push_str(&TreeFormatter::format_side(
            &self.output_properties,
            &self.store,
            IoSide::Output,
        ));
        if !self.custom_properties.is_empty() {
            output.push_str("--- CUSTOM ---\n");
            output.push_str(&TreeFormatter::format_custom(
                &self.custom_properties,
                &self.store,
            ));
        }
        output.push_str("--- INPUT ---\n");
        output.push_str(&TreeFormatter::format_side(
            &self.input_properties,
            &self.store,
            IoSide::Input,
        ));
        output
    }
}

fn resolve<'a>(
    trees: PropertyTrees<'a>,
    side: IoSide,
    path: &str,
) -> Result<&'a PropertyDescriptor, MappingError> {
    let property = match side {
        IoSide::Input => trees.input(path),
        IoSide::Output => trees.output_or_custom(path),
    };
    property.ok_or_else(|| MappingError::PropertyNotFound {
        side,
        path: path.to_string(),
    })
}
