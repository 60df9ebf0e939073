//! Validated-input field types.
//!
//! [`FieldType`] is the protocol-side view of a parameter: it can check a
//! JSON value and render itself as JSON Schema for the tool listing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn is_email(s: &str) -> bool {
    #[allow(clippy::expect_used)]
    let re = EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
    re.is_match(s)
}

fn is_date(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

fn is_uuid(s: &str) -> bool {
    uuid::Uuid::parse_str(s).is_ok()
}

// =============================================================================
// Field types
// =============================================================================

/// Validated type of a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Email,
    Url,
    Uuid,
    /// Accepts any value, including `null`.
    Any,
    Array(Box<FieldType>),
    Object(ObjectSchema),
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Atomic type for a primitive tag. Unknown tags map to [`FieldType::Any`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "email" => FieldType::Email,
            "url" => FieldType::Url,
            "uuid" => FieldType::Uuid,
            _ => FieldType::Any,
        }
    }

    /// Array of `inner`.
    pub fn array_of(inner: FieldType) -> Self {
        FieldType::Array(Box::new(inner))
    }

    /// Wrap as optional. Already-optional types are returned unchanged.
    pub fn into_optional(self) -> Self {
        match self {
            FieldType::Optional(_) => self,
            other => FieldType::Optional(Box::new(other)),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// Validate a JSON value against this type.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            FieldType::String => expect(value.is_string(), "string", value),
            FieldType::Number => expect(value.is_number(), "number", value),
            FieldType::Boolean => expect(value.is_boolean(), "boolean", value),
            FieldType::Date => string_format(value, "date", is_date),
            FieldType::Email => string_format(value, "email", is_email),
            FieldType::Url => string_format(value, "url", is_url),
            FieldType::Uuid => string_format(value, "uuid", is_uuid),
            FieldType::Any => Ok(()),
            FieldType::Array(inner) => {
                let arr = value
                    .as_array()
                    .ok_or_else(|| format!("expected array, got {}", value_type_name(value)))?;
                for (i, item) in arr.iter().enumerate() {
                    inner
                        .validate(item)
                        .map_err(|e| format!("at index {}: {}", i, e))?;
                }
                Ok(())
            }
            FieldType::Object(schema) => {
                if !value.is_object() {
                    return Err(format!("expected object, got {}", value_type_name(value)));
                }
                let errors = schema.validate_arguments(value);
                if errors.is_empty() {
                    Ok(())
                } else {
                    Err(errors.join("; "))
                }
            }
            // Optional means the field may be absent; a present value must match.
            FieldType::Optional(inner) => inner.validate(value),
        }
    }

    /// Human-readable type name.
    pub fn display_name(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Number => "number".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Date => "date".to_string(),
            FieldType::Email => "email".to_string(),
            FieldType::Url => "url".to_string(),
            FieldType::Uuid => "uuid".to_string(),
            FieldType::Any => "any".to_string(),
            FieldType::Array(inner) => format!("{}[]", inner.display_name()),
            FieldType::Object(_) => "object".to_string(),
            FieldType::Optional(inner) => format!("{}?", inner.display_name()),
        }
    }

    /// Render as JSON Schema. Optionality is expressed by the parent's `required` list.
    pub fn to_json_schema(&self) -> Value {
        match self {
            FieldType::String => json!({"type": "string"}),
            FieldType::Number => json!({"type": "number"}),
            FieldType::Boolean => json!({"type": "boolean"}),
            FieldType::Date => json!({
                "type": "string",
                "anyOf": [{"format": "date-time"}, {"format": "date"}]
            }),
            FieldType::Email => json!({"type": "string", "format": "email"}),
            FieldType::Url => json!({"type": "string", "format": "uri"}),
            FieldType::Uuid => json!({"type": "string", "format": "uuid"}),
            FieldType::Any => json!({}),
            FieldType::Array(inner) => json!({"type": "array", "items": inner.to_json_schema()}),
            FieldType::Object(schema) => schema.to_json_schema(),
            FieldType::Optional(inner) => inner.to_json_schema(),
        }
    }
}

fn expect(ok: bool, expected: &str, value: &Value) -> Result<(), String> {
    if ok {
        Ok(())
    } else {
        Err(format!("expected {}, got {}", expected, value_type_name(value)))
    }
}

fn string_format(value: &Value, format: &str, check: fn(&str) -> bool) -> Result<(), String> {
    match value.as_str() {
        Some(s) if check(s) => Ok(()),
        Some(s) => Err(format!("invalid {}: '{}'", format, s)),
        None => Err(format!("expected {} string, got {}", format, value_type_name(value))),
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Object schema
// =============================================================================

/// Named fields of an object parameter. Fields are kept sorted by name so
/// rendered schemas are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSchema {
    fields: BTreeMap<String, FieldType>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: FieldType) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FieldType) {
        self.fields.insert(name.into(), field);
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of fields a caller must supply.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, f)| !f.is_optional())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Mark an existing field optional. Returns false if the field is absent.
    pub fn make_optional(&mut self, name: &str) -> bool {
        match self.fields.remove(name) {
            Some(field) => {
                self.fields.insert(name.to_string(), field.into_optional());
                true
            }
            None => false,
        }
    }

    /// Validate tool arguments. Returns a list of violations (empty = valid).
    ///
    /// Fields not declared in the schema are accepted.
    pub fn validate_arguments(&self, args: &Value) -> Vec<String> {
        let empty = Map::new();
        let map = match args {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return vec![format!(
                    "arguments must be an object, got {}",
                    value_type_name(other)
                )]
            }
        };

        let mut errors = Vec::new();
        for (name, field) in &self.fields {
            match map.get(name) {
                Some(value) => {
                    if let Err(e) = field.validate(value) {
                        errors.push(format!("field '{}': {}", name, e));
                    }
                }
                None if !field.is_optional() => {
                    errors.push(format!("missing required field: {}", name));
                }
                None => {}
            }
        }
        errors
    }

    /// Render as a JSON Schema object.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, f)| (k.clone(), f.to_json_schema()))
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        let required = self.required_fields();
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }
}
