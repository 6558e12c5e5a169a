//! Parameter schemas for tool arguments.
//!
//! Each tool declares its argument contract as a data-driven schema value.
//! The same value serves two consumers that must never drift apart:
//!
//! - the invoker, which validates untrusted argument objects (applying
//!   declared defaults) before a tool's `execute` runs, and
//! - the declaration translator, which emits the JSON-schema description
//!   presented to the language model.

use serde_json::{json, Map, Value};
use std::fmt;

/// The type of a single schema node.
///
/// The root of every tool's parameter contract is an [`ObjectSchema`];
/// `Schema` describes the individual property values, including nested
/// objects and arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// A UTF-8 string.
    String,
    /// An integer, optionally bounded inclusively on either side.
    Integer {
        /// Inclusive lower bound
        minimum: Option<i64>,
        /// Inclusive upper bound
        maximum: Option<i64>,
    },
    /// Any JSON number.
    Number,
    /// A boolean.
    Boolean,
    /// A homogeneous array.
    Array {
        /// Schema of each element
        items: Box<Schema>,
    },
    /// A nested object with its own property contract.
    Object(ObjectSchema),
}

impl Schema {
    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::String
    }

    /// Creates an unbounded integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::Integer {
            minimum: None,
            maximum: None,
        }
    }

    /// Creates an integer schema with inclusive bounds.
    #[must_use]
    pub fn integer_in(minimum: i64, maximum: i64) -> Self {
        Self::Integer {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::Number
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Boolean
    }

    /// Creates an array schema with the given element schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    /// Creates a nested object schema.
    #[must_use]
    pub fn object(schema: ObjectSchema) -> Self {
        Self::Object(schema)
    }

    /// Returns the JSON-schema type tag for this node.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer { .. } => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array { .. } => "array",
            Self::Object(_) => "object",
        }
    }

    /// Emits the JSON-schema description of this node.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::String | Self::Number | Self::Boolean => {
                json!({"type": self.type_name()})
            }
            Self::Integer { minimum, maximum } => {
                let mut node = Map::new();
                node.insert("type".to_string(), json!("integer"));
                if let Some(min) = minimum {
                    node.insert("minimum".to_string(), json!(min));
                }
                if let Some(max) = maximum {
                    node.insert("maximum".to_string(), json!(max));
                }
                Value::Object(node)
            }
            Self::Array { items } => {
                json!({"type": "array", "items": items.to_json_schema()})
            }
            Self::Object(schema) => schema.to_json_schema(),
        }
    }

    /// Checks `value` against this schema, returning the coerced value.
    ///
    /// Scalars and arrays are passed through as-is when they match; nested
    /// objects are coerced recursively (defaults inserted, undeclared
    /// properties dropped). Mismatches are recorded in `violations` and
    /// `Value::Null` is returned in their place.
    fn coerce(&self, value: &Value, path: &str, violations: &mut Vec<SchemaViolation>) -> Value {
        match self {
            Self::String => {
                if value.is_string() {
                    value.clone()
                } else {
                    violations.push(SchemaViolation::expected(path, "string", value));
                    Value::Null
                }
            }
            Self::Integer { minimum, maximum } => match value.as_i64() {
                Some(n) => {
                    if let Some(min) = minimum {
                        if n < *min {
                            violations.push(SchemaViolation::new(
                                path,
                                format!("{n} is below the minimum of {min}"),
                            ));
                            return Value::Null;
                        }
                    }
                    if let Some(max) = maximum {
                        if n > *max {
                            violations.push(SchemaViolation::new(
                                path,
                                format!("{n} is above the maximum of {max}"),
                            ));
                            return Value::Null;
                        }
                    }
                    value.clone()
                }
                None => {
                    violations.push(SchemaViolation::expected(path, "integer", value));
                    Value::Null
                }
            },
            Self::Number => {
                if value.is_number() {
                    value.clone()
                } else {
                    violations.push(SchemaViolation::expected(path, "number", value));
                    Value::Null
                }
            }
            Self::Boolean => {
                if value.is_boolean() {
                    value.clone()
                } else {
                    violations.push(SchemaViolation::expected(path, "boolean", value));
                    Value::Null
                }
            }
            Self::Array { items } => match value.as_array() {
                Some(elements) => {
                    let coerced: Vec<Value> = elements
                        .iter()
                        .enumerate()
                        .map(|(i, element)| {
                            items.coerce(element, &format!("{path}[{i}]"), violations)
                        })
                        .collect();
                    Value::Array(coerced)
                }
                None => {
                    violations.push(SchemaViolation::expected(path, "array", value));
                    Value::Null
                }
            },
            Self::Object(schema) => schema.coerce(value, path, violations),
        }
    }
}

/// A named property within an [`ObjectSchema`].
#[derive(Debug, Clone, PartialEq)]
struct Property {
    schema: Schema,
    description: Option<String>,
    required: bool,
    default: Option<Value>,
}

/// The argument contract of a tool: an ordered set of named properties.
///
/// Property order is preserved so that emitted declarations are stable.
///
/// # Example
///
/// ```rust
/// use studium_ai::schema::{ObjectSchema, Schema};
/// use serde_json::json;
///
/// let schema = ObjectSchema::new()
///     .required("path", Schema::string(), "Route path to open")
///     .optional_with_default(
///         "limit",
///         Schema::integer_in(1, 50),
///         "Maximum number of entries",
///         json!(10),
///     );
///
/// let validated = schema.validate(json!({"path": "/materials"})).unwrap();
/// assert_eq!(validated["limit"], json!(10));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectSchema {
    properties: Vec<(String, Property)>,
}

impl ObjectSchema {
    /// Creates an empty object schema (no declared properties).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required property.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, schema: Schema, description: &str) -> Self {
        self.properties.push((
            name.into(),
            Property {
                schema,
                description: Some(description.to_string()),
                required: true,
                default: None,
            },
        ));
        self
    }

    /// Adds an optional property with no default.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, schema: Schema, description: &str) -> Self {
        self.properties.push((
            name.into(),
            Property {
                schema,
                description: Some(description.to_string()),
                required: false,
                default: None,
            },
        ));
        self
    }

    /// Adds an optional property whose default is inserted when the caller
    /// omits it.
    #[must_use]
    pub fn optional_with_default(
        mut self,
        name: impl Into<String>,
        schema: Schema,
        description: &str,
        default: Value,
    ) -> Self {
        self.properties.push((
            name.into(),
            Property {
                schema,
                description: Some(description.to_string()),
                required: false,
                default: Some(default),
            },
        ));
        self
    }

    /// Returns the names of required properties, in declaration order.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|(_, p)| p.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns true if no properties are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Emits the JSON-schema description of this object.
    ///
    /// The root always carries `type`, `properties`, and `required`, even
    /// when empty.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for (name, property) in &self.properties {
            let mut node = property.schema.to_json_schema();
            if let Value::Object(ref mut fields) = node {
                if let Some(ref description) = property.description {
                    fields.insert("description".to_string(), json!(description));
                }
                if let Some(ref default) = property.default {
                    fields.insert("default".to_string(), default.clone());
                }
            }
            properties.insert(name.clone(), node);
        }

        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": self.required_names(),
        })
    }

    /// Validates an untrusted argument value against this schema.
    ///
    /// `Value::Null` is accepted as an empty object since the model may omit
    /// the arguments object entirely. On success the returned object contains
    /// every declared property that was present or had a default; undeclared
    /// properties are dropped. On failure every violation found is reported,
    /// not just the first.
    ///
    /// # Errors
    ///
    /// Returns the collected [`SchemaViolation`]s when any property is
    /// missing, mistyped, or out of bounds.
    pub fn validate(&self, raw: Value) -> Result<Value, Vec<SchemaViolation>> {
        let mut violations = Vec::new();
        let coerced = self.coerce(&raw, "", &mut violations);
        if violations.is_empty() {
            Ok(coerced)
        } else {
            Err(violations)
        }
    }

    fn coerce(&self, value: &Value, path: &str, violations: &mut Vec<SchemaViolation>) -> Value {
        let fields = match value {
            Value::Object(fields) => fields.clone(),
            Value::Null => Map::new(),
            other => {
                violations.push(SchemaViolation::expected(
                    if path.is_empty() { "(root)" } else { path },
                    "object",
                    other,
                ));
                return Value::Null;
            }
        };

        let mut out = Map::new();
        for (name, property) in &self.properties {
            let property_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };

            match fields.get(name) {
                Some(present) => {
                    out.insert(
                        name.clone(),
                        property.schema.coerce(present, &property_path, violations),
                    );
                }
                None if property.required => {
                    violations.push(SchemaViolation::new(
                        &property_path,
                        "required property is missing",
                    ));
                }
                None => {
                    if let Some(ref default) = property.default {
                        out.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        for name in fields.keys() {
            if !self.properties.iter().any(|(declared, _)| declared == name) {
                tracing::debug!(property = %name, "dropping undeclared argument property");
            }
        }

        Value::Object(out)
    }
}

/// A single validation failure, located by a dotted path into the argument
/// object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Path to the offending property (`limit`, `filters.kind`, `tags[2]`)
    pub path: String,
    /// What went wrong
    pub message: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    fn expected(path: &str, expected: &str, got: &Value) -> Self {
        let got = match got {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self::new(path, format!("expected {expected}, got {got}"))
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
