//! Parameter schema translation.
//!
//! Turns the registry's loosely-typed parameter schemas into validated input
//! schemas. Translation is total: shapes it cannot classify degrade to
//! [`FieldType::Any`] instead of failing, because the registry's schemas are
//! third-party metadata.

pub mod field;
pub mod node;

pub use field::{FieldType, ObjectSchema};
pub use node::{Fields, SchemaNode};

use serde_json::Value;

/// Translate a classified node into a field type.
pub fn translate(node: &SchemaNode) -> FieldType {
    match node {
        SchemaNode::Tag(tag) => FieldType::from_tag(tag),
        SchemaNode::List(first) | SchemaNode::Array { items: first } => {
            FieldType::array_of(first.as_deref().map_or(FieldType::Any, translate))
        }
        SchemaNode::Object { fields } => FieldType::Object(object_schema(fields)),
        SchemaNode::Typed { tag, optional } => {
            let field = FieldType::from_tag(tag);
            if *optional {
                field.into_optional()
            } else {
                field
            }
        }
        SchemaNode::Implicit { fields, optional } => {
            // An implicit mapping with no schema-bearing entries is an opaque blob.
            let field = if fields.is_empty() {
                FieldType::Any
            } else {
                FieldType::Object(object_schema(fields))
            };
            if *optional {
                field.into_optional()
            } else {
                field
            }
        }
        SchemaNode::Unrecognized => FieldType::Any,
    }
}

/// Parse and translate a raw schema value.
pub fn translate_value(value: &Value) -> FieldType {
    translate(&SchemaNode::parse(value))
}

/// Build the top-level input schema of a tool.
///
/// Absent, empty or non-mapping schemas produce an object with no fields.
pub fn build_root_schema(params: Option<&Value>) -> ObjectSchema {
    match params {
        Some(value) => object_schema(SchemaNode::parse(value).fields()),
        None => ObjectSchema::new(),
    }
}

fn object_schema(fields: &[(String, SchemaNode)]) -> ObjectSchema {
    fields
        .iter()
        .fold(ObjectSchema::new(), |schema, (name, node)| {
            schema.with_field(name.clone(), translate(node))
        })
}
