//! Type-safe schema generation for OpenAI structured outputs.
//!
//! Uses `schemars` to derive a JSON schema from the Rust type the caller
//! expects back, then rewrites it into the dialect OpenAI's strict mode accepts.
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Caption {
//!     content: String,
//! }
//!
//! let schema = Caption::openai_schema();
//! ```

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Trait for types that can be requested as OpenAI structured output.
///
/// Blanket-implemented for every `JsonSchema + DeserializeOwned` type.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// OpenAI-compatible JSON schema for this type.
    ///
    /// Strict mode requires `additionalProperties: false` on every object,
    /// every property listed in `required` (nullable ones included), and no
    /// `$ref` indirection.
    fn openai_schema() -> Value {
        let mut value = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        let definitions = match &mut value {
            Value::Object(root) => {
                root.remove("$schema");
                root.remove("definitions")
            }
            _ => None,
        };

        if let Some(definitions) = definitions {
            inline_refs(&mut value, &definitions);
        }
        close_objects(&mut value);

        value
    }

    /// Schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Replace every `{"$ref": "#/definitions/X"}` with the definition of `X`.
fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(mut inlined) = target {
                inline_refs(&mut inlined, definitions);
                *value = inlined;
                return;
            }

            for nested in map.values_mut() {
                inline_refs(nested, definitions);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

/// Mark every object schema closed with all properties required.
fn close_objects(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if is_object_schema(map) {
                map.insert("additionalProperties".to_string(), Value::Bool(false));

                let required: Vec<Value> = map
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|props| props.keys().cloned().map(Value::String).collect())
                    .unwrap_or_default();
                map.insert("required".to_string(), Value::Array(required));
            }

            for nested in map.values_mut() {
                close_objects(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                close_objects(item);
            }
        }
        _ => {}
    }
}

fn is_object_schema(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t == "object"),
        _ => false,
    }
}
