//! Conversion of registered tools into LLM function-calling declarations.
//!
//! The model-facing schema dialect differs from plain JSON Schema in one
//! respect: `type` tags are uppercase (`"STRING"`, `"OBJECT"`). The
//! conversion here is a pure recursive transform over the JSON value, so a
//! property that happens to be *named* `type` is untouched — only the
//! `type` keys whose value is a string are rewritten.

use crate::tools::descriptor::ToolDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tool declaration in the model-facing catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// Normalized parameter schema; root is always an object with
    /// `properties` and `required` present.
    pub parameters: Value,
}

/// Builds the declaration for one descriptor.
#[must_use]
pub fn declaration_for(descriptor: &dyn ToolDescriptor) -> ToolDeclaration {
    let schema = descriptor.parameters().to_json_schema();
    ToolDeclaration {
        name: descriptor.name().to_string(),
        description: descriptor.description().to_string(),
        parameters: normalize_types(ensure_object_root(schema)),
    }
}

/// Guarantees the root is an object carrying `properties` and `required`,
/// inserting empty ones when absent. Tools without parameters still
/// declare an empty object schema.
fn ensure_object_root(schema: Value) -> Value {
    let mut root = match schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    root.entry("type".to_string())
        .or_insert_with(|| Value::String("object".to_string()));
    root.entry("properties".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    root.entry("required".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    Value::Object(root)
}

/// Recursively uppercases every `"type"` key whose value is a string.
fn normalize_types(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let normalized = map
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(tag) if key == "type" => {
                            Value::String(tag.to_uppercase())
                        }
                        other => normalize_types(other),
                    };
                    (key, value)
                })
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_types).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ObjectSchema, Schema};
    use crate::tools::descriptor::ToolFuture;
    use crate::types::CallerId;
    use serde_json::json;

    struct SampleTool {
        parameters: ObjectSchema,
    }

    impl ToolDescriptor for SampleTool {
        fn name(&self) -> &str {
            "sample"
        }

        fn description(&self) -> &str {
            "A sample tool"
        }

        fn parameters(&self) -> ObjectSchema {
            self.parameters.clone()
        }

        fn execute(&self, _caller: CallerId, _args: Value) -> ToolFuture {
            Box::pin(async move { Ok(json!(null)) })
        }
    }

    #[test]
    fn declaration_uppercases_type_tags_recursively() {
        let tool = SampleTool {
            parameters: ObjectSchema::new()
                .required("path", Schema::string(), "Route path")
                .optional("tags", Schema::array(Schema::string()), "Labels"),
        };

        let declaration = declaration_for(&tool);
        assert_eq!(declaration.name, "sample");
        assert_eq!(declaration.parameters["type"], json!("OBJECT"));
        assert_eq!(
            declaration.parameters["properties"]["path"]["type"],
            json!("STRING")
        );
        assert_eq!(
            declaration.parameters["properties"]["tags"]["type"],
            json!("ARRAY")
        );
        assert_eq!(
            declaration.parameters["properties"]["tags"]["items"]["type"],
            json!("STRING")
        );
        assert_eq!(declaration.parameters["required"], json!(["path"]));
    }

    #[test]
    fn empty_schema_still_declares_object_root() {
        let tool = SampleTool {
            parameters: ObjectSchema::new(),
        };

        let declaration = declaration_for(&tool);
        assert_eq!(declaration.parameters["type"], json!("OBJECT"));
        assert_eq!(declaration.parameters["properties"], json!({}));
        assert_eq!(declaration.parameters["required"], json!([]));
    }

    #[test]
    fn property_named_type_is_not_rewritten() {
        let normalized = normalize_types(json!({
            "type": "object",
            "properties": {
                "type": {"type": "string", "description": "A record kind"}
            }
        }));

        assert_eq!(normalized["type"], json!("OBJECT"));
        assert_eq!(normalized["properties"]["type"]["type"], json!("STRING"));
        assert_eq!(
            normalized["properties"]["type"]["description"],
            json!("A record kind")
        );
    }

    #[test]
    fn non_string_type_value_is_recursed_not_uppercased() {
        let normalized = normalize_types(json!({
            "type": {"type": "string"}
        }));

        assert_eq!(normalized["type"]["type"], json!("STRING"));
    }
}
