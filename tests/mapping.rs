//! Tests for serializing sessions and persisting mapping specifications.
mod common;
use common::*;
use schemap::prelude::*;
use serde_json::json;

fn entry(from: &str, to: &str) -> MappingEntry {
    MappingEntry {
        from: from.to_string(),
        to: to.to_string(),
        default_value: None,
    }
}

#[test]
fn test_connected_properties_become_mapping_entries() {
    let mut session = open_session(profile_input_socket(), person_output_socket());
    wire(&mut session, "name", "fullName");
    wire(&mut session, "age", "years");

    let spec = session.create_mapping().unwrap();
    assert_eq!(spec.mapping, vec![entry("name", "fullName"), entry("age", "years")]);
    assert!(spec.custom_fields.is_empty());
    assert!(spec.static_fields.is_empty());
}

#[test]
fn test_invalid_session_serializes_nothing() {
    let mut session = open_session(strict_profile_input_socket(), person_output_socket());
    wire(&mut session, "name", "fullName");

    let error = session.create_mapping().unwrap_err();
    assert_eq!(error.to_string(), "Mapping is invalid");
    match error {
        MappingError::InvalidMapping { issues } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].path, "years");
        }
        other => panic!("Expected InvalidMapping, got {:?}", other),
    }
}

#[test]
fn test_static_values_replace_mapping_entries() {
    let mut session = open_session(strict_profile_input_socket(), person_output_socket());
    wire(&mut session, "name", "fullName");
    session.set_static_value("years", json!(5)).unwrap();

    let spec = session.create_mapping().unwrap();
    assert_eq!(spec.mapping, vec![entry("name", "fullName")]);
    assert_eq!(
        spec.static_fields,
        vec![FieldValue {
            to: "years".to_string(),
            value: json!(5)
        }]
    );
}

#[test]
fn test_default_value_rides_on_mapping_entry() {
    let mut session = open_session(profile_input_socket(), person_output_socket());
    wire(&mut session, "age", "years");
    session.set_default_value("years", json!(18)).unwrap();

    let spec = session.create_mapping().unwrap();
    assert_eq!(
        spec.mapping,
        vec![MappingEntry {
            from: "age".to_string(),
            to: "years".to_string(),
            default_value: Some(json!(18)),
        }]
    );
    assert!(spec.static_fields.is_empty());
}

#[test]
fn test_custom_sources_become_custom_fields() {
    let mut session = open_session(profile_input_socket(), person_output_socket());
    let path = session
        .add_custom_property("label", PropertyType::String, json!("Anonymous"))
        .unwrap();
    wire(&mut session, &path, "fullName");

    let spec = session.create_mapping().unwrap();
    assert!(spec.mapping.is_empty());
    assert_eq!(
        spec.custom_fields,
        vec![FieldValue {
            to: "fullName".to_string(),
            value: json!("Anonymous")
        }]
    );
}

#[test]
fn test_pseudo_and_reopened_connections_are_not_serialized() {
    let mut session = open_session(address_socket("address-in"), address_socket("address-out"));
    session.pick(IoSide::Output, "address").unwrap();
    session.drop_on(IoSide::Input, "address").unwrap();

    // Start re-dragging one child connection without finishing.
    session.pick(IoSide::Input, "address.zip").unwrap();

    let spec = session.create_mapping().unwrap();
    assert_eq!(spec.mapping, vec![entry("address.city", "address.city")]);
}

#[test]
fn test_empty_session_serializes_empty_spec() {
    let session = open_session(profile_input_socket(), person_output_socket());
    let spec = session.create_mapping().unwrap();
    assert!(spec.is_empty());
}

#[test]
fn test_json_layout() {
    let spec = MappingSpecification::new(
        vec![
            entry("name", "fullName"),
            MappingEntry {
                from: "age".to_string(),
                to: "years".to_string(),
                default_value: Some(json!(0)),
            },
        ],
        vec![FieldValue {
            to: "nickname".to_string(),
            value: json!("Bob"),
        }],
        vec![],
    );
    let value: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "mapping": [
                { "from": "name", "to": "fullName" },
                { "from": "age", "to": "years", "defaultValue": 0 }
            ],
            "customFields": [ { "to": "nickname", "value": "Bob" } ],
            "staticFields": []
        })
    );
}

#[test]
fn test_missing_lists_default_to_empty() {
    let spec = MappingSpecification::from_json(r#"{ "mapping": [ { "from": "a", "to": "b" } ] }"#)
        .unwrap();
    assert_eq!(spec.mapping, vec![entry("a", "b")]);
    assert!(spec.custom_fields.is_empty());
    assert!(spec.static_fields.is_empty());
}

#[test]
fn test_duplicate_targets_are_rejected() {
    let json = r#"{
        "mapping": [ { "from": "name", "to": "fullName" } ],
        "customFields": [ { "to": "fullName", "value": "Bob" } ]
    }"#;
    match MappingSpecification::from_json(json) {
        Err(SpecificationError::DuplicateTarget(path)) => assert_eq!(path, "fullName"),
        other => panic!("Expected DuplicateTarget, got {:?}", other),
    }

    // A static value may coexist with a mapping on the same target.
    let json = r#"{
        "mapping": [ { "from": "name", "to": "fullName" } ],
        "staticFields": [ { "to": "fullName", "value": "Bob" } ]
    }"#;
    assert!(MappingSpecification::from_json(json).is_ok());
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let result = MappingSpecification::from_json("{ \"mapping\": 5 }");
    assert!(matches!(result, Err(SpecificationError::JsonParseError(_))));
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapping.json");
    let path = path.to_str().unwrap();

    let spec = order_mapping();
    spec.save(path).unwrap();
    let loaded = MappingSpecification::from_file(path).unwrap();
    assert_eq!(loaded, spec);
}

#[test]
fn test_loading_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let path = path.to_str().unwrap();

    match MappingSpecification::from_file(path) {
        Err(SpecificationError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_lookup_helpers() {
    let spec = order_mapping();
    assert_eq!(spec.static_value("years"), Some(&json!(30)));
    assert_eq!(spec.default_value("address.city"), Some(&json!("Berlin")));
    assert_eq!(spec.default_value("fullName"), None);
    assert_eq!(spec.static_value("fullName"), None);
}
