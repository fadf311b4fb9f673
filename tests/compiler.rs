//! Tests for compiling socket schemas into property trees.
mod common;
use common::*;
use schemap::prelude::*;
use schemap::property::{find_by_path, flatten};
use serde_json::json;

fn names(properties: &[PropertyDescriptor]) -> Vec<&str> {
    properties
        .iter()
        .map(|p| p.property_name.as_str())
        .collect()
}

#[test]
fn test_compile_builds_paths_and_levels() {
    let properties = compile(&order_input_socket(), IoSide::Input);

    let city = find_by_path(&properties, "address.city").expect("address.city compiled");
    assert_eq!(city.property_name, "city");
    assert_eq!(city.nesting_level, 1);
    assert_eq!(city.property_type, PropertyType::String);

    let address = find_by_path(&properties, "address").unwrap();
    assert_eq!(address.nesting_level, 0);
    assert!(address.is_object());
    assert_eq!(address.children().len(), 2);
}

#[test]
fn test_required_is_evaluated_per_level() {
    let properties = compile(&order_input_socket(), IoSide::Input);

    assert!(find_by_path(&properties, "fullName").unwrap().required);
    assert!(find_by_path(&properties, "years").unwrap().required);
    assert!(!find_by_path(&properties, "nickname").unwrap().required);
    // "address" itself is not in the root's required list.
    assert!(!find_by_path(&properties, "address").unwrap().required);
    assert!(find_by_path(&properties, "address.city").unwrap().required);
    assert!(!find_by_path(&properties, "address.zip").unwrap().required);
}

#[test]
fn test_objects_sort_after_scalars() {
    let socket = SocketSchema::new(
        "mixed",
        json!({
            "properties": {
                "meta": { "type": "object", "properties": { "id": { "type": "string" } } },
                "b": { "type": "string" },
                "inner": {
                    "type": "object",
                    "properties": {
                        "deep": { "type": "object", "properties": {} },
                        "flag": { "type": "boolean" }
                    }
                },
                "a": { "type": "integer" }
            }
        }),
    );
    let properties = compile(&socket, IoSide::Output);

    assert_eq!(names(&properties), vec!["b", "a", "meta", "inner"]);
    let inner = find_by_path(&properties, "inner").unwrap();
    assert_eq!(names(inner.children()), vec!["flag", "deep"]);
}

#[test]
fn test_any_data_marks_only_top_level() {
    let socket = SocketSchema::new(ANY_DATA_SOCKET_ID, order_input_socket().schema);
    let properties = compile(&socket, IoSide::Input);

    assert!(properties.iter().all(|p| p.is_any_data));
    let address = find_by_path(&properties, "address").unwrap();
    assert!(address.children().iter().all(|p| !p.is_any_data));
}

#[test]
fn test_custom_any_data_socket_id() {
    let socket = SocketSchema::new("wildcard", json!({
        "properties": { "payload": { "type": "string" } }
    }));

    let default_compiled = compile(&socket, IoSide::Output);
    assert!(!default_compiled[0].is_any_data);

    let compiled = SchemaCompiler::builder(&socket)
        .with_any_data_socket("wildcard")
        .build()
        .compile(IoSide::Output);
    assert!(compiled[0].is_any_data);
}

#[test]
fn test_existing_mapping_attaches_values() {
    let socket = order_input_socket();
    let existing = order_mapping();
    let properties = SchemaCompiler::builder(&socket)
        .with_existing_mapping(&existing)
        .build()
        .compile(IoSide::Input);

    let years = find_by_path(&properties, "years").unwrap();
    assert_eq!(years.value, Some(json!(30)));
    assert_eq!(years.value_type, Some(ValueType::Static));
    assert!(!years.is_validation_error);

    let city = find_by_path(&properties, "address.city").unwrap();
    assert_eq!(city.value, Some(json!("Berlin")));
    assert_eq!(city.value_type, Some(ValueType::Default));

    // Mapped without a default: no value attached.
    let full_name = find_by_path(&properties, "fullName").unwrap();
    assert_eq!(full_name.value_type, None);
}

#[test]
fn test_existing_mapping_ignored_on_output_side() {
    let socket = order_input_socket();
    let existing = order_mapping();
    let properties = SchemaCompiler::builder(&socket)
        .with_existing_mapping(&existing)
        .build()
        .compile(IoSide::Output);

    assert!(flatten(&properties).iter().all(|p| p.value_type.is_none()));
}

#[test]
fn test_static_value_wins_over_default() {
    let socket = profile_input_socket();
    let existing = MappingSpecification::new(
        vec![MappingEntry {
            from: "age".to_string(),
            to: "years".to_string(),
            default_value: Some(json!(1)),
        }],
        vec![],
        vec![FieldValue {
            to: "years".to_string(),
            value: json!(2),
        }],
    );
    let properties = SchemaCompiler::builder(&socket)
        .with_existing_mapping(&existing)
        .build()
        .compile(IoSide::Input);

    let years = find_by_path(&properties, "years").unwrap();
    assert_eq!(years.value_type, Some(ValueType::Static));
    assert_eq!(years.value, Some(json!(2)));
}

#[test]
fn test_malformed_schema_degrades_to_leaves() {
    let socket = SocketSchema::new(
        "broken",
        json!({
            "properties": {
                "untyped": {},
                "numericType": { "type": 42 },
                "implicitObject": { "properties": { "count": { "type": "number" } } },
                "notASchema": "garbage",
                "unknown": { "type": "date-time" }
            },
            "required": ["untyped", 7]
        }),
    );
    let properties = compile(&socket, IoSide::Input);

    assert_eq!(
        names(&properties),
        vec!["untyped", "numericType", "notASchema", "unknown", "implicitObject"]
    );
    for name in ["untyped", "numericType", "notASchema", "unknown"] {
        let property = find_by_path(&properties, name).unwrap();
        assert_eq!(property.property_type, PropertyType::String, "{}", name);
        assert!(property.nested_properties.is_none());
    }
    assert!(find_by_path(&properties, "untyped").unwrap().required);

    let count = find_by_path(&properties, "implicitObject.count").unwrap();
    assert_eq!(count.property_type, PropertyType::Integer);
}

#[test]
fn test_schema_without_properties_compiles_empty() {
    let socket = SocketSchema::new("scalar", json!({ "type": "string" }));
    assert!(compile(&socket, IoSide::Output).is_empty());

    let socket = SocketSchema::new("null", serde_json::Value::Null);
    assert!(compile(&socket, IoSide::Output).is_empty());
}

#[test]
fn test_schema_metadata_is_carried() {
    let socket = SocketSchema::new(
        "meta",
        json!({
            "properties": {
                "level": {
                    "type": "string",
                    "enum": ["low", "high"],
                    "default": "low",
                    "description": "Alert level"
                }
            }
        }),
    );
    let properties = compile(&socket, IoSide::Input);
    let level = &properties[0];

    assert_eq!(level.enum_values, Some(vec![json!("low"), json!("high")]));
    assert_eq!(level.default, Some(json!("low")));
    assert_eq!(level.description.as_deref(), Some("Alert level"));
    // A schema default is metadata only; it is not a configured fallback.
    assert_eq!(level.value_type, None);
}

#[test]
fn test_socket_schema_from_json_aliases() {
    let socket = SocketSchema::from_json(
        r#"{ "socketId": "s1", "structure": { "properties": { "x": { "type": "boolean" } } } }"#,
    )
    .expect("socket JSON parses");
    assert_eq!(socket.id, "s1");
    let properties = compile(&socket, IoSide::Output);
    assert_eq!(properties[0].property_type, PropertyType::Boolean);
}
