//! Common test utilities for building sockets, sessions and mappings.
use schemap::prelude::*;
use serde_json::json;

/// Producer socket: `{ name: string, age: integer (required) }`
#[allow(dead_code)]
pub fn person_output_socket() -> SocketSchema {
    SocketSchema::new(
        "person",
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" }
            },
            "required": ["age"]
        }),
    )
}

/// Consumer socket: `{ fullName: string (required), years: integer }`
#[allow(dead_code)]
pub fn profile_input_socket() -> SocketSchema {
    SocketSchema::new(
        "profile",
        json!({
            "type": "object",
            "properties": {
                "fullName": { "type": "string" },
                "years": { "type": "integer" }
            },
            "required": ["fullName"]
        }),
    )
}

/// Same as `profile_input_socket`, but `years` is required too.
#[allow(dead_code)]
pub fn strict_profile_input_socket() -> SocketSchema {
    SocketSchema::new(
        "strict-profile",
        json!({
            "type": "object",
            "properties": {
                "fullName": { "type": "string" },
                "years": { "type": "integer" }
            },
            "required": ["fullName", "years"]
        }),
    )
}

/// A socket with a single `address: { city, zip }` object.
#[allow(dead_code)]
pub fn address_socket(id: &str) -> SocketSchema {
    SocketSchema::new(
        id,
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "properties": {
                        "city": { "type": "string" },
                        "zip": { "type": "string" }
                    }
                }
            }
        }),
    )
}

/// A richer consumer used for round-trip tests.
///
/// `fullName`, `years` and `address.city` are required.
#[allow(dead_code)]
pub fn order_input_socket() -> SocketSchema {
    SocketSchema::new(
        "order-in",
        json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "properties": {
                        "city": { "type": "string" },
                        "zip": { "type": "string" }
                    },
                    "required": ["city"]
                },
                "fullName": { "type": "string" },
                "years": { "type": "integer" },
                "nickname": { "type": "string" },
                "tags": { "type": "array" }
            },
            "required": ["fullName", "years"]
        }),
    )
}

/// The producer matching `order_input_socket`.
#[allow(dead_code)]
pub fn order_output_socket() -> SocketSchema {
    SocketSchema::new(
        "order-out",
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" },
                "address": {
                    "type": "object",
                    "properties": {
                        "city": { "type": "string" },
                        "zip": { "type": "string" }
                    },
                    "required": ["city"]
                }
            },
            "required": ["name", "age"]
        }),
    )
}

/// A persisted mapping for the order sockets that uses every record kind.
#[allow(dead_code)]
pub fn order_mapping() -> MappingSpecification {
    MappingSpecification::new(
        vec![
            MappingEntry {
                from: "name".to_string(),
                to: "fullName".to_string(),
                default_value: None,
            },
            MappingEntry {
                from: "address.city".to_string(),
                to: "address.city".to_string(),
                default_value: Some(json!("Berlin")),
            },
        ],
        vec![FieldValue {
            to: "nickname".to_string(),
            value: json!("Bob"),
        }],
        vec![FieldValue {
            to: "years".to_string(),
            value: json!(30),
        }],
    )
}

/// Opens a session between two sockets with default settings.
#[allow(dead_code)]
pub fn open_session(input: SocketSchema, output: SocketSchema) -> MappingSession {
    let mut session = MappingSession::default();
    session.open(input, output, None);
    session
}

/// Drags from an output path and drops on an input path.
#[allow(dead_code)]
pub fn wire(session: &mut MappingSession, from: &str, to: &str) -> Vec<ConnectionId> {
    session.pick(IoSide::Output, from).expect("pick output");
    session.drop_on(IoSide::Input, to).expect("drop on input")
}

/// Builds a leaf descriptor for compatibility tests.
#[allow(dead_code)]
pub fn leaf(name: &str, property_type: PropertyType, required: bool) -> PropertyDescriptor {
    PropertyDescriptor::new(name, name, property_type, 0).with_required(required)
}

/// Sorts every record list by target path so specs compare as sets.
#[allow(dead_code)]
pub fn normalized(mut spec: MappingSpecification) -> MappingSpecification {
    spec.mapping.sort_by(|a, b| a.to.cmp(&b.to));
    spec.custom_fields.sort_by(|a, b| a.to.cmp(&b.to));
    spec.static_fields.sort_by(|a, b| a.to.cmp(&b.to));
    spec
}
