//! In-place normalization of `implementation.container.command` / `args`.

use serde_json::{Map, Value};

use crate::argument::ArgumentType;

/// Sections of `implementation.container` that hold command-line arguments.
pub const TARGET_FIELDS: [&str; 2] = ["command", "args"];

/// Rewrite every bare string under `implementation.container.command` and
/// `implementation.container.args` into `{"stringValue": <string>}`.
///
/// Objects (placeholder references) are left as they are, order and
/// duplicates are preserved, and documents that lack the sections are left
/// untouched. Applying the conversion twice gives the same result as
/// applying it once.
pub fn convert_target_fields_to_kv_pair(doc: &mut Value) {
    let Some(container) = doc
        .get_mut("implementation")
        .and_then(|imp| imp.get_mut("container"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    for field in TARGET_FIELDS {
        if let Some(Value::Array(entries)) = container.get_mut(field) {
            for entry in entries.iter_mut() {
                if let Value::String(s) = entry {
                    let literal = std::mem::take(s);
                    let mut wrapper = Map::with_capacity(1);
                    wrapper.insert(
                        ArgumentType::StringValue.as_str().to_string(),
                        Value::String(literal),
                    );
                    *entry = Value::Object(wrapper);
                }
            }
        }
    }
}
