//! Parameter schema nodes as published by the action registry.
//!
//! Registry schemas are loosely typed: a node may be a bare type tag, a
//! one-element list, a descriptor mapping with a `type` key, or a plain
//! mapping of field names. [`SchemaNode`] classifies a raw JSON value once so
//! translation can be a single exhaustive match.

use serde_json::{Map, Value};

/// Mapping keys that carry validator metadata rather than fields.
pub const METADATA_KEYS: [&str; 2] = ["$$strict", "$$async"];

/// Descriptor keys dropped when a `type: "object"` mapping has no `props` wrapper.
const DESCRIPTOR_KEYS: [&str; 2] = ["type", "optional"];

/// Named child nodes of an object-like mapping, in source order.
pub type Fields = Vec<(String, SchemaNode)>;

/// A classified parameter schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Bare type tag, e.g. `"string"`.
    Tag(String),
    /// Sequence whose first element (if any) describes the element type.
    List(Option<Box<SchemaNode>>),
    /// `{ type: "array", items? }`.
    Array { items: Option<Box<SchemaNode>> },
    /// `{ type: "object", ... }` or any mapping with a `props` key.
    Object { fields: Fields },
    /// `{ type: <tag>, optional? }` for any other tag string.
    Typed { tag: String, optional: bool },
    /// Plain mapping of field name to node.
    Implicit { fields: Fields, optional: bool },
    /// Anything else: null, numbers, booleans.
    Unrecognized,
}

impl SchemaNode {
    /// Classify a raw schema value.
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::String(tag) => SchemaNode::Tag(tag.clone()),
            Value::Array(items) => SchemaNode::List(items.first().map(|v| Box::new(Self::parse(v)))),
            Value::Object(map) => Self::parse_mapping(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => SchemaNode::Unrecognized,
        }
    }

    fn parse_mapping(map: &Map<String, Value>) -> Self {
        let optional = map.get("optional").and_then(Value::as_bool).unwrap_or(false);

        match map.get("type").and_then(Value::as_str) {
            Some("array") => SchemaNode::Array {
                items: map.get("items").map(|v| Box::new(Self::parse(v))),
            },
            Some("object") => SchemaNode::Object {
                fields: object_fields(map),
            },
            _ if map.contains_key("props") => SchemaNode::Object {
                fields: object_fields(map),
            },
            Some(tag) => SchemaNode::Typed {
                tag: tag.to_string(),
                optional,
            },
            None => SchemaNode::Implicit {
                fields: collect_fields(map, &[]),
                optional,
            },
        }
    }

    /// Child fields of an object-like node; empty for everything else.
    pub fn fields(&self) -> &[(String, SchemaNode)] {
        match self {
            SchemaNode::Object { fields } | SchemaNode::Implicit { fields, .. } => fields,
            _ => &[],
        }
    }
}

fn object_fields(map: &Map<String, Value>) -> Fields {
    match map.get("props") {
        Some(Value::Object(props)) => collect_fields(props, &[]),
        Some(_) => Vec::new(),
        None => collect_fields(map, &DESCRIPTOR_KEYS),
    }
}

/// Parse every entry except metadata keys and values that carry no schema
/// (flags such as `optional: true` or `$$root: true`).
fn collect_fields(map: &Map<String, Value>, skip: &[&str]) -> Fields {
    map.iter()
        .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()) && !skip.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), SchemaNode::parse(value)))
        .filter(|(_, node)| *node != SchemaNode::Unrecognized)
        .collect()
}
