//! Change notifications for the connection store
//!
//! UI layers redraw in response to these. Exactly one event is sent per
//! state transition.

use super::model::MappingConnection;
use crate::property::IoSide;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

/// Receives connection events.
///
/// This abstracts over how the host delivers notifications (channel,
/// callback, log) so the store can be driven from any shell.
pub trait EventSink: Send + Sync {
    /// Returns an error if the event could not be delivered.
    fn send(&self, event: ConnectionEvent) -> Result<(), EventError>;
}

/// Error when delivering an event fails
#[derive(Error, Debug, Clone)]
#[error("Event error: {message}")]
pub struct EventError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConnectionEvent {
    /// A drag started at this property
    Picked { side: IoSide, path: String },

    /// The pointer was released over this property
    Dropped { side: IoSide, path: String },

    /// The pending drag was released without a target
    PickCancelled,

    /// A connection became existing, either new or re-pointed
    Created { connection: MappingConnection },

    /// A real connection was detached
    Removed { connection: MappingConnection },

    /// Every connection was discarded
    Cleared,
}

/// Discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: ConnectionEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// Collects events in memory. Useful for tests.
pub struct VecEventSink {
    events: Mutex<Vec<ConnectionEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<ConnectionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: ConnectionEvent) -> Result<(), EventError> {
        let mut events = self.events.lock().map_err(|_| EventError {
            message: "Event buffer poisoned".to_string(),
        })?;
        events.push(event);
        Ok(())
    }
}
