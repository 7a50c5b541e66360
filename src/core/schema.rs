// src/core/schema.rs

//! Structural parameter schemas for tool inputs.
//!
//! Validating adapters parse raw arguments through an [`ObjectSchema`] before
//! a tool body runs. `parse` applies declared defaults, strips unknown keys
//! and reports every violated constraint at once instead of stopping at the
//! first. `to_json_schema` produces the JSON-Schema form protocol clients
//! consume.

use serde_json::{json, Map, Value};

use super::error::ValidationError;

/// Shape of a single schema node.
#[derive(Debug, Clone)]
pub enum Schema {
    /// UTF-8 string, optionally restricted to a fixed set of literals.
    String { allowed: Option<Vec<String>> },
    /// Any JSON number.
    Number,
    /// Whole number only.
    Integer,
    Boolean,
    /// Homogeneous array of the item schema.
    Array(Box<Schema>),
    /// Nested object.
    Object(ObjectSchema),
    /// Union: the value must match at least one variant.
    OneOf(Vec<Schema>),
    /// Accepts any JSON value unchanged. Used for passthrough payloads such
    /// as raw JSON-RPC params.
    Any,
}

impl Schema {
    pub fn string() -> Self {
        Schema::String { allowed: None }
    }

    /// String restricted to one of the given literals.
    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::String {
            allowed: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn number() -> Self {
        Schema::Number
    }

    pub fn integer() -> Self {
        Schema::Integer
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn array(item: Schema) -> Self {
        Schema::Array(Box::new(item))
    }

    pub fn object(shape: ObjectSchema) -> Self {
        Schema::Object(shape)
    }

    pub fn one_of(variants: Vec<Schema>) -> Self {
        Schema::OneOf(variants)
    }

    pub fn any() -> Self {
        Schema::Any
    }

    fn type_name(&self) -> &'static str {
        match self {
            Schema::String { .. } => "string",
            Schema::Number => "number",
            Schema::Integer => "integer",
            Schema::Boolean => "boolean",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
            Schema::OneOf(_) => "union",
            Schema::Any => "any",
        }
    }

    /// Whether `value`'s top-level JSON type could satisfy this node. Used to
    /// rank union variants when none matched.
    fn accepts_shape(&self, value: &Value) -> bool {
        match self {
            Schema::String { .. } => value.is_string(),
            Schema::Number | Schema::Integer => value.is_number(),
            Schema::Boolean => value.is_boolean(),
            Schema::Array(_) => value.is_array(),
            Schema::Object(_) => value.is_object() || value.is_null(),
            Schema::OneOf(_) | Schema::Any => true,
        }
    }

    /// Checks `value` at `path`, pushing violations and returning the
    /// normalized value when this node accepted it.
    fn check(&self, path: &str, value: &Value, violations: &mut Vec<String>) -> Option<Value> {
        match self {
            Schema::String { allowed } => match value.as_str() {
                Some(s) => {
                    if let Some(allowed) = allowed {
                        if !allowed.iter().any(|a| a == s) {
                            violations.push(format!(
                                "{path}: expected one of [{}], got '{s}'",
                                allowed.join(", ")
                            ));
                            return None;
                        }
                    }
                    Some(value.clone())
                }
                None => {
                    violations.push(type_mismatch(path, "string", value));
                    None
                }
            },
            Schema::Number => {
                if value.is_number() {
                    Some(value.clone())
                } else {
                    violations.push(type_mismatch(path, "number", value));
                    None
                }
            }
            Schema::Integer => {
                if value.is_i64() || value.is_u64() {
                    Some(value.clone())
                } else {
                    violations.push(type_mismatch(path, "integer", value));
                    None
                }
            }
            Schema::Boolean => {
                if value.is_boolean() {
                    Some(value.clone())
                } else {
                    violations.push(type_mismatch(path, "boolean", value));
                    None
                }
            }
            Schema::Array(item) => match value.as_array() {
                Some(items) => {
                    let before = violations.len();
                    let mut out = Vec::with_capacity(items.len());
                    for (i, element) in items.iter().enumerate() {
                        if let Some(parsed) =
                            item.check(&format!("{path}[{i}]"), element, violations)
                        {
                            out.push(parsed);
                        }
                    }
                    if violations.len() == before {
                        Some(Value::Array(out))
                    } else {
                        None
                    }
                }
                None => {
                    violations.push(type_mismatch(path, "array", value));
                    None
                }
            },
            Schema::Object(shape) => shape.check(path, value, violations),
            Schema::OneOf(variants) => {
                // Keep the closest variant's violations so a near-miss (e.g.
                // a nested object with one bad field) reports the actual
                // problem instead of just "no variant matched". Variants whose
                // top-level type fits the value rank ahead of plain type
                // mismatches; ties go to fewer violations.
                let mut closest: Option<(bool, Vec<String>)> = None;
                for variant in variants {
                    let mut scratch = Vec::new();
                    if let Some(parsed) = variant.check(path, value, &mut scratch) {
                        if scratch.is_empty() {
                            return Some(parsed);
                        }
                    }
                    let shape_miss = !variant.accepts_shape(value);
                    let closer = match &closest {
                        None => true,
                        Some((best_miss, best)) => {
                            (shape_miss, scratch.len()) < (*best_miss, best.len())
                        }
                    };
                    if closer {
                        closest = Some((shape_miss, scratch));
                    }
                }
                let names: Vec<&str> = variants.iter().map(Schema::type_name).collect();
                violations.push(format!(
                    "{path}: no union variant matched (expected {})",
                    names.join(" | ")
                ));
                if let Some((_, inner)) = closest {
                    violations.extend(inner);
                }
                None
            }
            Schema::Any => Some(value.clone()),
        }
    }

    /// JSON-Schema representation of this node.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Schema::String { allowed: None } => json!({ "type": "string" }),
            Schema::String {
                allowed: Some(values),
            } => json!({ "type": "string", "enum": values }),
            Schema::Number => json!({ "type": "number" }),
            Schema::Integer => json!({ "type": "integer" }),
            Schema::Boolean => json!({ "type": "boolean" }),
            Schema::Array(item) => json!({ "type": "array", "items": item.to_json_schema() }),
            Schema::Object(shape) => shape.to_json_schema(),
            Schema::OneOf(variants) => json!({
                "anyOf": variants.iter().map(Schema::to_json_schema).collect::<Vec<_>>()
            }),
            Schema::Any => json!({}),
        }
    }
}

fn type_mismatch(path: &str, expected: &str, got: &Value) -> String {
    format!("{path}: expected {expected}, got {}", json_type_name(got))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone)]
struct Field {
    name: String,
    description: String,
    schema: Schema,
    required: bool,
    default: Option<Value>,
}

/// Ordered object schema describing a tool's expected input shape.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<Field>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required field.
    pub fn field(mut self, name: &str, description: &str, schema: Schema) -> Self {
        self.fields.push(Field {
            name: name.into(),
            description: description.into(),
            schema,
            required: true,
            default: None,
        });
        self
    }

    /// Adds an optional field with no default; when absent it stays absent.
    pub fn optional(mut self, name: &str, description: &str, schema: Schema) -> Self {
        self.fields.push(Field {
            name: name.into(),
            description: description.into(),
            schema,
            required: false,
            default: None,
        });
        self
    }

    /// Adds an optional field whose declared default is filled in when the
    /// caller omits it.
    pub fn optional_with_default(
        mut self,
        name: &str,
        description: &str,
        schema: Schema,
        default: Value,
    ) -> Self {
        self.fields.push(Field {
            name: name.into(),
            description: description.into(),
            schema,
            required: false,
            default: Some(default),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates `input` and returns the normalized parameters.
    ///
    /// Unknown keys are stripped, defaults are applied for omitted optional
    /// fields, and all violations are reported together. `null` input is
    /// treated as an empty object so tools without required fields accept
    /// absent arguments.
    pub fn parse(&self, input: &Value) -> Result<Value, ValidationError> {
        let mut violations = Vec::new();
        match self.check("$", input, &mut violations) {
            Some(parsed) if violations.is_empty() => Ok(parsed),
            _ => Err(ValidationError::new(violations)),
        }
    }

    fn check(&self, path: &str, value: &Value, violations: &mut Vec<String>) -> Option<Value> {
        let empty = Map::new();
        let map = match value {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                violations.push(type_mismatch(path, "object", other));
                return None;
            }
        };

        let before = violations.len();
        let mut out = Map::new();
        for field in &self.fields {
            let field_path = format!("{path}.{}", field.name);
            match map.get(&field.name) {
                Some(present) if !present.is_null() => {
                    if let Some(parsed) = field.schema.check(&field_path, present, violations) {
                        out.insert(field.name.clone(), parsed);
                    }
                }
                _ => {
                    if field.required {
                        violations.push(format!("{field_path}: missing required field"));
                    } else if let Some(default) = &field.default {
                        out.insert(field.name.clone(), default.clone());
                    }
                }
            }
        }

        if violations.len() == before {
            Some(Value::Object(out))
        } else {
            None
        }
    }

    /// JSON-Schema object form: `type`/`properties`/`required`, with field
    /// descriptions and defaults attached and unknown keys rejected.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            let mut property = field.schema.to_json_schema();
            if let Value::Object(obj) = &mut property {
                if !field.description.is_empty() {
                    obj.insert("description".into(), json!(field.description));
                }
                if let Some(default) = &field.default {
                    obj.insert("default".into(), default.clone());
                }
            }
            properties.insert(field.name.clone(), property);
            if field.required {
                required.push(field.name.clone());
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field("to", "Recipient address", Schema::string())
            .field("amount", "Amount to send", Schema::string())
            .optional_with_default(
                "format_amount",
                "Treat amount as a decimal value",
                Schema::boolean(),
                json!(false),
            )
    }

    #[test]
    fn valid_input_passes_through_with_defaults() {
        let parsed = transfer_schema()
            .parse(&json!({ "to": "0xabc", "amount": "10" }))
            .unwrap();
        assert_eq!(parsed["to"], "0xabc");
        assert_eq!(parsed["amount"], "10");
        assert_eq!(parsed["format_amount"], false);
    }

    #[test]
    fn explicit_value_overrides_default() {
        let parsed = transfer_schema()
            .parse(&json!({ "to": "0xabc", "amount": "10", "format_amount": true }))
            .unwrap();
        assert_eq!(parsed["format_amount"], true);
    }

    #[test]
    fn unknown_keys_are_stripped() {
        let parsed = transfer_schema()
            .parse(&json!({ "to": "0xabc", "amount": "10", "gas": "999" }))
            .unwrap();
        assert!(parsed.get("gas").is_none());
    }

    #[test]
    fn all_violations_reported_together() {
        let err = transfer_schema()
            .parse(&json!({ "amount": 10, "format_amount": "yes" }))
            .unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.violations.iter().any(|v| v.contains("$.to")));
        assert!(err.violations.iter().any(|v| v.contains("$.amount")));
        assert!(err.violations.iter().any(|v| v.contains("$.format_amount")));
    }

    #[test]
    fn enum_rejects_unlisted_literal() {
        let schema = ObjectSchema::new().field(
            "swap_type",
            "Type of swap",
            Schema::string_enum(["EXACT_INPUT", "EXACT_OUTPUT"]),
        );
        assert!(schema.parse(&json!({ "swap_type": "EXACT_INPUT" })).is_ok());
        let err = schema.parse(&json!({ "swap_type": "BOTH" })).unwrap_err();
        assert!(err.violations[0].contains("EXACT_INPUT"));
        assert!(err.violations[0].contains("'BOTH'"));
    }

    #[test]
    fn integer_rejects_fractional_number() {
        let schema = ObjectSchema::new().field("id", "Request id", Schema::integer());
        assert!(schema.parse(&json!({ "id": 7 })).is_ok());
        assert!(schema.parse(&json!({ "id": 7.5 })).is_err());
    }

    #[test]
    fn array_items_validated_with_index_paths() {
        let schema =
            ObjectSchema::new().field("hashes", "Transaction hashes", Schema::array(Schema::string()));
        let err = schema
            .parse(&json!({ "hashes": ["0xa", 2, "0xc"] }))
            .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].contains("$.hashes[1]"));
    }

    #[test]
    fn nested_object_paths() {
        let schema = ObjectSchema::new().field(
            "token",
            "Token details",
            Schema::object(ObjectSchema::new().field("symbol", "Ticker", Schema::string())),
        );
        let err = schema.parse(&json!({ "token": {} })).unwrap_err();
        assert!(err.violations[0].contains("$.token.symbol"));
    }

    #[test]
    fn one_of_accepts_any_matching_variant() {
        let schema = ObjectSchema::new().field(
            "block",
            "Block number or tag",
            Schema::one_of(vec![Schema::integer(), Schema::string()]),
        );
        assert!(schema.parse(&json!({ "block": 12 })).is_ok());
        assert!(schema.parse(&json!({ "block": "latest" })).is_ok());
        assert!(schema.parse(&json!({ "block": true })).is_err());
    }

    #[test]
    fn one_of_mismatch_reports_closest_variant_violations() {
        let schema = ObjectSchema::new().field(
            "target",
            "Address or token descriptor",
            Schema::one_of(vec![
                Schema::string(),
                Schema::object(
                    ObjectSchema::new()
                        .field("address", "Contract address", Schema::string())
                        .field("decimals", "Token decimals", Schema::integer()),
                ),
            ]),
        );
        // Near-miss on the object variant: one good field, one missing.
        let err = schema
            .parse(&json!({ "target": { "address": "0xabc" } }))
            .unwrap_err();
        assert!(err.violations[0].contains("no union variant matched"));
        assert!(err
            .violations
            .iter()
            .any(|v| v.contains("$.target.decimals") && v.contains("missing required field")));
    }

    #[test]
    fn null_input_treated_as_empty_object() {
        let optional_only = ObjectSchema::new().optional_with_default(
            "verbose",
            "Verbose output",
            Schema::boolean(),
            json!(false),
        );
        let parsed = optional_only.parse(&Value::Null).unwrap();
        assert_eq!(parsed["verbose"], false);

        let err = transfer_schema().parse(&Value::Null).unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn json_schema_shape() {
        let schema = transfer_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["to", "amount"]));
        assert_eq!(schema["properties"]["to"]["type"], "string");
        assert_eq!(schema["properties"]["to"]["description"], "Recipient address");
        assert_eq!(schema["properties"]["format_amount"]["default"], false);
    }

    #[test]
    fn json_schema_enum_and_items() {
        let schema = ObjectSchema::new()
            .field("mode", "Mode", Schema::string_enum(["a", "b"]))
            .field("values", "Values", Schema::array(Schema::number()))
            .to_json_schema();
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["a", "b"]));
        assert_eq!(schema["properties"]["values"]["items"]["type"], "number");
    }
}
