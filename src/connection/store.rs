use super::events::{ConnectionEvent, EventSink, NullEventSink};
use super::model::{ConnectionId, MappingConnection, PendingConnection};
use crate::compatibility::{find_compatible_counterpart, is_compatible};
use crate::error::MappingError;
use crate::property::{IoSide, PropertyDescriptor, PropertyTrees};
use std::sync::Arc;

/// In-memory bipartite graph of property-to-property connections.
///
/// An input path is the target of at most one existing connection; an
/// output path may fan out to any number of inputs.
pub struct ConnectionStore {
    connections: Vec<MappingConnection>,
    pending: Option<PendingConnection>,
    sink: Arc<dyn EventSink>,
}

impl Default for ConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullEventSink))
    }

    pub fn with_sink(sink: Arc<dyn EventSink>) -> Self {
        Self {
            connections: Vec::new(),
            pending: None,
            sink,
        }
    }

    /// All connections in insertion order, pseudo and pending included.
    pub fn connections(&self) -> &[MappingConnection] {
        &self.connections
    }

    /// Existing, non-preview connections in insertion order.
    pub fn real_connections(&self) -> impl Iterator<Item = &MappingConnection> {
        self.connections.iter().filter(|c| c.is_real())
    }

    pub fn pseudo_connections(&self) -> impl Iterator<Item = &MappingConnection> {
        self.connections.iter().filter(|c| c.is_pseudo_connection)
    }

    pub fn pending(&self) -> Option<&PendingConnection> {
        self.pending.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&MappingConnection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Connections ending at `path` on `side`, in insertion order.
    pub fn query(&self, side: IoSide, path: &str) -> Vec<&MappingConnection> {
        self.connections
            .iter()
            .filter(|c| c.touches(side, path))
            .collect()
    }

    /// Connections whose producer is the custom property at `path`.
    pub fn query_custom(&self, path: &str) -> Vec<&MappingConnection> {
        self.connections
            .iter()
            .filter(|c| c.output_is_custom && c.output_path == path)
            .collect()
    }

    /// The single real connection feeding the input at `path`.
    pub fn source_of(&self, input_path: &str) -> Option<&MappingConnection> {
        self.real_connections().find(|c| c.input_path == input_path)
    }

    /// Begins a drag from `property`.
    ///
    /// Picking an input that already has a source reopens that connection:
    /// its output end becomes the fixed endpoint of the drag.
    pub fn pick(&mut self, property: &PropertyDescriptor, side: IoSide) {
        if self.pending.is_some() {
            self.cancel_pick();
        }

        let reopened = match side {
            IoSide::Input => self
                .connections
                .iter_mut()
                .find(|c| c.is_real() && c.input_path == property.path),
            IoSide::Output => None,
        };

        let pending = match reopened {
            Some(connection) => {
                connection.is_existing = false;
                log::debug!(
                    "Reopened connection {} ({} -> {})",
                    connection.id,
                    connection.output_path,
                    connection.input_path
                );
                PendingConnection {
                    side: IoSide::Output,
                    path: connection.output_path.clone(),
                    is_custom: connection.output_is_custom,
                    reopened: Some(connection.id.clone()),
                    pointer: None,
                }
            }
            None => PendingConnection {
                side,
                path: property.path.clone(),
                is_custom: property.is_custom,
                reopened: None,
                pointer: None,
            },
        };

        self.emit(ConnectionEvent::Picked {
            side: pending.side,
            path: pending.path.clone(),
        });
        self.pending = Some(pending);
    }

    /// Records the pointer position of the pending drag. Has no other effect.
    pub fn move_pointer(&mut self, x: f64, y: f64) {
        if let Some(pending) = self.pending.as_mut() {
            pending.pointer = Some((x, y));
        }
    }

    /// Discards the pending drag. A reopened connection released over
    /// nothing is detached.
    pub fn cancel_pick(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        self.emit(ConnectionEvent::PickCancelled);
        if let Some(id) = pending.reopened {
            self.remove(&id);
        }
    }

    /// Completes the pending drag by dropping it on `property`.
    ///
    /// Compatibility is NOT checked here; callers must run
    /// [`is_compatible`] first. Returns the ids of the connections created.
    pub fn try_connect(
        &mut self,
        side: IoSide,
        property: &PropertyDescriptor,
        trees: PropertyTrees<'_>,
    ) -> Result<Vec<ConnectionId>, MappingError> {
        let pending = self.pending.take().ok_or(MappingError::NoActivePick)?;
        self.emit(ConnectionEvent::Dropped {
            side,
            path: property.path.clone(),
        });

        if pending.side == side {
            log::debug!("Dropped on the picked side; discarding drag");
            if let Some(id) = pending.reopened {
                self.remove(&id);
            }
            return Ok(Vec::new());
        }

        let (output, input) = match side {
            IoSide::Input => {
                let output = trees.output(&pending.path, pending.is_custom).ok_or_else(|| {
                    MappingError::PropertyNotFound {
                        side: IoSide::Output,
                        path: pending.path.clone(),
                    }
                })?;
                (output, property)
            }
            IoSide::Output => {
                let input =
                    trees
                        .input(&pending.path)
                        .ok_or_else(|| MappingError::PropertyNotFound {
                            side: IoSide::Input,
                            path: pending.path.clone(),
                        })?;
                (property, input)
            }
        };

        if output.is_object() && input.is_object() && !input.is_any_data {
            if let Some(id) = &pending.reopened {
                self.remove(id);
            }
            let created = self.connect_children(output, input);
            if !created.is_empty() {
                self.add_pseudo(output, input);
            }
            return Ok(created);
        }

        let id = match pending.reopened {
            Some(id) => self.repoint(&id, output, input),
            None => self.connect(output, input),
        };
        Ok(vec![id])
    }

    /// Connects every matching nested pair of two object properties.
    pub fn connect_children(
        &mut self,
        output: &PropertyDescriptor,
        input: &PropertyDescriptor,
    ) -> Vec<ConnectionId> {
        self.connect_matching(output.children(), input.children())
    }

    /// Connects everything that matches between the two whole trees.
    pub fn connect_all(&mut self, trees: PropertyTrees<'_>) -> Vec<ConnectionId> {
        let created = self.connect_matching(trees.output, trees.input);
        log::debug!("Connected {} properties", created.len());
        created
    }

    /// Adds a preview link. Ignored when `input` already has a real source.
    pub fn add_pseudo(&mut self, output: &PropertyDescriptor, input: &PropertyDescriptor) {
        if self.source_of(&input.path).is_some() {
            return;
        }
        self.connections
            .retain(|c| !(c.is_pseudo_connection && c.input_path == input.path));
        self.connections
            .push(MappingConnection::pseudo(output, input));
    }

    /// Detaches a connection. Pseudo connections are dropped silently.
    pub fn remove(&mut self, id: &str) -> Option<MappingConnection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        let connection = self.connections.remove(index);

        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.reopened.as_deref() == Some(id))
        {
            self.pending = None;
        }

        if !connection.is_pseudo_connection {
            log::debug!(
                "Removed connection {} ({} -> {})",
                connection.id,
                connection.output_path,
                connection.input_path
            );
            self.emit(ConnectionEvent::Removed {
                connection: connection.clone(),
            });
        }
        Some(connection)
    }

    /// Removes every connection ending at `path` or below it on `side`.
    pub fn remove_touching(&mut self, side: IoSide, path: &str) -> Vec<MappingConnection> {
        let prefix = format!("{}.", path);
        let ids: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|c| {
                let endpoint = match side {
                    IoSide::Input => &c.input_path,
                    IoSide::Output if !c.output_is_custom => &c.output_path,
                    IoSide::Output => return false,
                };
                endpoint == path || endpoint.starts_with(&prefix)
            })
            .map(|c| c.id.clone())
            .collect();
        ids.iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Removes every connection produced by the custom property at `path`.
    pub fn remove_custom(&mut self, path: &str) -> Vec<MappingConnection> {
        let ids: Vec<ConnectionId> = self
            .query_custom(path)
            .into_iter()
            .map(|c| c.id.clone())
            .collect();
        ids.iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Discards all connections and any pending drag.
    pub fn clear_all(&mut self) {
        self.connections.clear();
        self.pending = None;
        self.emit(ConnectionEvent::Cleared);
    }

    fn connect_matching(
        &mut self,
        outputs: &[PropertyDescriptor],
        inputs: &[PropertyDescriptor],
    ) -> Vec<ConnectionId> {
        let mut created = Vec::new();
        for input in inputs {
            if input.is_object() && !input.is_any_data {
                let nested = outputs.iter().find(|output| {
                    output.is_object()
                        && output.property_name == input.property_name
                        && is_compatible(output, input)
                });
                if let Some(output) = nested {
                    created.extend(self.connect_children(output, input));
                }
                continue;
            }

            if self.source_of(&input.path).is_some() {
                continue;
            }
            if let Some(output) = find_compatible_counterpart(outputs, input) {
                created.push(self.connect(output, input));
            }
        }
        created
    }

    /// Adds a real connection, first detaching whatever fed `input`.
    /// Used for programmatic wiring; compatibility is not checked.
    pub fn connect(
        &mut self,
        output: &PropertyDescriptor,
        input: &PropertyDescriptor,
    ) -> ConnectionId {
        self.detach_input(&input.path, None);
        let connection = MappingConnection::new(output, input);
        let id = connection.id.clone();
        log::debug!(
            "Connected {} -> {} ({})",
            connection.output_path,
            connection.input_path,
            id
        );
        self.connections.push(connection.clone());
        self.emit(ConnectionEvent::Created { connection });
        id
    }

    /// Finishes a reopened connection in place with new endpoints.
    fn repoint(
        &mut self,
        id: &str,
        output: &PropertyDescriptor,
        input: &PropertyDescriptor,
    ) -> ConnectionId {
        self.detach_input(&input.path, Some(id));
        let Some(connection) = self.connections.iter_mut().find(|c| c.id == id) else {
            return self.connect(output, input);
        };
        connection.output_path = output.path.clone();
        connection.output_is_custom = output.is_custom;
        connection.input_path = input.path.clone();
        connection.is_existing = true;
        let connection = connection.clone();
        self.emit(ConnectionEvent::Created {
            connection: connection.clone(),
        });
        connection.id
    }

    fn detach_input(&mut self, input_path: &str, keep: Option<&str>) {
        self.connections
            .retain(|c| !(c.is_pseudo_connection && c.input_path == input_path));
        let stale: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|c| c.is_existing && c.input_path == input_path)
            .filter(|c| keep != Some(c.id.as_str()))
            .map(|c| c.id.clone())
            .collect();
        for id in stale {
            self.remove(&id);
        }
    }

    fn emit(&self, event: ConnectionEvent) {
        if let Err(e) = self.sink.send(event) {
            log::warn!("Dropping connection event: {}", e);
        }
    }
}
