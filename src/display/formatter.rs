use crate::connection::ConnectionStore;
use crate::property::{IoSide, PropertyDescriptor, ValueType};
use itertools::Itertools;
use std::fmt::Write;

/// Formats property trees and their connections into human-readable text.
pub struct TreeFormatter;

impl TreeFormatter {
    /// Renders one side of a session, one property per line, indented by nesting level.
    ///
    /// Required properties are marked with `*`. Inputs show their source
    /// (`<- path`), outputs show their targets (`-> a, b`).
    pub fn format_side(
        properties: &[PropertyDescriptor],
        store: &ConnectionStore,
        side: IoSide,
    ) -> String {
        let mut output = String::new();
        for property in properties {
            Self::format_recursive(&mut output, property, store, side);
        }
        output
    }

    /// Renders the user-added literal producers and their targets.
    pub fn format_custom(custom: &[PropertyDescriptor], store: &ConnectionStore) -> String {
        let mut output = String::new();
        for property in custom {
            let targets = store
                .query_custom(&property.path)
                .into_iter()
                .filter(|c| c.is_real())
                .map(|c| c.input_path.as_str())
                .join(", ");
            let _ = write!(output, "{}", Self::describe(property));
            if !targets.is_empty() {
                let _ = write!(output, " -> {}", targets);
            }
            output.push('\n');
        }
        output
    }

    fn format_recursive(
        output: &mut String,
        property: &PropertyDescriptor,
        store: &ConnectionStore,
        side: IoSide,
    ) {
        let indent = "  ".repeat(property.nesting_level);
        let _ = write!(output, "{}{}", indent, Self::describe(property));

        match side {
            IoSide::Input => {
                if let Some(source) = store.source_of(&property.path) {
                    let _ = write!(output, " <- {}", Self::source_label(&source.output_path));
                }
            }
            IoSide::Output => {
                let targets = store
                    .query(IoSide::Output, &property.path)
                    .into_iter()
                    .filter(|c| c.is_real())
                    .map(|c| c.input_path.as_str())
                    .join(", ");
                if !targets.is_empty() {
                    let _ = write!(output, " -> {}", targets);
                }
            }
        }
        if property.is_validation_error {
            output.push_str(" [invalid]");
        }
        output.push('\n');

        for child in property.children() {
            Self::format_recursive(output, child, store, side);
        }
    }

    fn describe(property: &PropertyDescriptor) -> String {
        let mut text = format!("{}: {}", property.property_name, property.property_type);
        if property.required {
            text.push('*');
        }
        if property.is_any_data {
            text.push_str(" (any)");
        }
        if let Some(value) = &property.value {
            let label = match (property.is_custom, property.value_type) {
                (true, _) => "literal",
                (false, Some(ValueType::Static)) => "static",
                (false, Some(ValueType::Default)) => "default",
                (false, None) => "value",
            };
            text.push_str(&format!(" = {} ({})", value, label));
        }
        text
    }

    fn source_label(path: &str) -> &str {
        path.strip_prefix(crate::property::CUSTOM_PATH_PREFIX)
            .unwrap_or(path)
    }
}
