//! Connection legality between an output (producer) and an input (consumer) property.
//!
//! The check is directional: `is_compatible(a, b)` and `is_compatible(b, a)`
//! routinely differ, e.g. a string input accepts an integer output but an
//! integer input rejects a string output.

use crate::property::{PropertyDescriptor, PropertyType};

/// Decides whether `output` may feed `input`.
pub fn is_compatible(output: &PropertyDescriptor, input: &PropertyDescriptor) -> bool {
    // Wildcard sockets accept any required producer, and feed any required consumer.
    if input.is_any_data && output.required {
        return true;
    }
    if output.is_any_data && input.required {
        return true;
    }

    // String inputs stringify whatever they receive.
    if output.property_type != input.property_type && input.property_type != PropertyType::String
    {
        return false;
    }

    if !input.is_object() {
        // A required slot cannot be fed by an optional producer without a fallback.
        return !(input.required && !output.required && input.value_type.is_none());
    }

    // One matching field is enough for objects.
    input.children().iter().any(|input_child| {
        output.children().iter().any(|output_child| {
            output_child.property_name == input_child.property_name
                && is_compatible(output_child, input_child)
        })
    })
}

/// Finds the first same-named output sibling that may feed `input`.
pub fn find_compatible_counterpart<'a>(
    outputs: &'a [PropertyDescriptor],
    input: &PropertyDescriptor,
) -> Option<&'a PropertyDescriptor> {
    outputs
        .iter()
        .find(|output| output.property_name == input.property_name && is_compatible(output, input))
}
