//! Tool entries — one protocol-facing tool bound to one action.

use crate::registry::{ActionDescriptor, ActionRegistry};
use crate::schema::{build_root_schema, ObjectSchema};
use crate::types::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

// =============================================================================
// Tool responses
// =============================================================================

/// One content item of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Successful tool call result, shaped as `{ content: [{ type: "text", text }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// Wrap an action result as a single text item holding its JSON form.
    pub fn from_result(result: &Value) -> Result<Self> {
        Ok(Self::text(serde_json::to_string_pretty(result)?))
    }

    /// Concatenated text of all content items.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Tool entry
// =============================================================================

/// A built tool: name, description, input schema and dispatch target.
///
/// Entries are immutable once built. Cloning is cheap enough for snapshot
/// copies; the registry handle is shared.
#[derive(Clone)]
pub struct ToolEntry {
    name: String,
    action: String,
    description: String,
    input_schema: ObjectSchema,
    overrides: Map<String, Value>,
    registry: Arc<dyn ActionRegistry>,
}

impl ToolEntry {
    /// Build a tool for `action`.
    ///
    /// Every schema field that has an override becomes optional, since the
    /// override is injected into each call.
    pub fn new(
        name: impl Into<String>,
        action: &ActionDescriptor,
        description: impl Into<String>,
        overrides: Map<String, Value>,
        registry: Arc<dyn ActionRegistry>,
    ) -> Self {
        let mut input_schema = build_root_schema(action.params.as_ref());
        for field in overrides.keys() {
            input_schema.make_optional(field);
        }

        Self {
            name: name.into(),
            action: action.name.clone(),
            description: description.into(),
            input_schema,
            overrides,
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the action this tool forwards to.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &ObjectSchema {
        &self.input_schema
    }

    pub fn overrides(&self) -> &Map<String, Value> {
        &self.overrides
    }

    /// Shallow-merge caller arguments with the overrides. Overrides win.
    ///
    /// `null` counts as no arguments; any other non-object is rejected.
    pub fn merge_arguments(&self, args: Value) -> Result<Map<String, Value>> {
        let mut merged = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::validation(format!(
                    "arguments for tool '{}' must be an object, got {}",
                    self.name, other
                )))
            }
        };
        for (key, value) in &self.overrides {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }

    /// Check caller arguments against the input schema.
    ///
    /// Overridden fields are optional in the schema, so callers may omit them.
    pub fn validate_arguments(&self, args: &Value) -> Result<()> {
        let errors = self.input_schema.validate_arguments(args);
        if errors.is_empty() {
            return Ok(());
        }
        Err(Error::validation(format!(
            "invalid arguments for tool '{}': {}",
            self.name,
            errors.join("; ")
        )))
    }

    /// Validate and forward a tool call to the action. Registry errors are
    /// returned unchanged.
    pub async fn dispatch(&self, args: Value) -> Result<ToolResponse> {
        if let Err(e) = self.validate_arguments(&args) {
            tracing::debug!(tool = %self.name, error = %e, "rejected tool arguments");
            return Err(e);
        }
        let params = self.merge_arguments(args)?;
        tracing::debug!(tool = %self.name, action = %self.action, "dispatching tool call");

        match self.registry.call(&self.action, Value::Object(params)).await {
            Ok(result) => ToolResponse::from_result(&result),
            Err(e) => {
                tracing::warn!(tool = %self.name, action = %self.action, error = %e, "action call failed");
                Err(e)
            }
        }
    }

    /// Protocol listing entry: `{ name, description, inputSchema }`.
    pub fn to_listing(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema.to_json_schema(),
        })
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("action", &self.action)
            .field("description", &self.description)
            .field("fields", &self.input_schema.field_names())
            .field("overrides", &self.overrides)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticActionRegistry;
    use crate::schema::FieldType;
    use async_trait::async_trait;
    use serde_json::json;

    struct FailingRegistry;

    #[async_trait]
    impl ActionRegistry for FailingRegistry {
        async fn list_actions(&self) -> Result<Vec<ActionDescriptor>> {
            Ok(Vec::new())
        }

        async fn call(&self, action: &str, _params: Value) -> Result<Value> {
            Err(Error::dispatch(action, "service unavailable"))
        }
    }

    fn list_action() -> ActionDescriptor {
        ActionDescriptor::new("users.list").with_params(json!({
            "limit": "number",
            "offset": "number",
            "q": {"type": "string", "optional": true}
        }))
    }

    fn overrides(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn echo_registry() -> Arc<dyn ActionRegistry> {
        Arc::new(StaticActionRegistry::new(vec![list_action()]))
    }

    #[test]
    fn test_overrides_make_fields_optional() {
        let entry = ToolEntry::new(
            "get_user_list",
            &list_action(),
            "List users",
            overrides(json!({"limit": 10, "unknown": true})),
            echo_registry(),
        );

        let schema = entry.input_schema();
        assert_eq!(schema.required_fields(), vec!["offset"]);
        assert_eq!(schema.get("limit"), Some(&FieldType::Number.into_optional()));
        // overrides never add fields
        assert!(schema.get("unknown").is_none());
    }

    #[test]
    fn test_no_overrides_keeps_schema() {
        let entry = ToolEntry::new("users_list", &list_action(), "d", Map::new(), echo_registry());
        assert_eq!(entry.input_schema().required_fields(), vec!["limit", "offset"]);
    }

    #[test]
    fn test_merge_overrides_win() {
        let entry = ToolEntry::new(
            "t",
            &list_action(),
            "d",
            overrides(json!({"limit": 10})),
            echo_registry(),
        );
        let merged = entry.merge_arguments(json!({"offset": 20, "limit": 99})).unwrap();
        assert_eq!(Value::Object(merged), json!({"offset": 20, "limit": 10}));

        let merged = entry.merge_arguments(Value::Null).unwrap();
        assert_eq!(Value::Object(merged), json!({"limit": 10}));

        assert!(matches!(
            entry.merge_arguments(json!([1])),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_wraps_result_as_text() {
        let entry = ToolEntry::new(
            "get_user_list",
            &list_action(),
            "d",
            overrides(json!({"limit": 10})),
            echo_registry(),
        );
        let response = entry.dispatch(json!({"offset": 20})).await.unwrap();

        assert_eq!(response.content.len(), 1);
        let echoed: Value = serde_json::from_str(&response.joined_text()).unwrap();
        assert_eq!(
            echoed,
            json!({"action": "users.list", "params": {"offset": 20, "limit": 10}})
        );
    }

    #[tokio::test]
    async fn test_dispatch_propagates_registry_error() {
        let entry = ToolEntry::new("t", &list_action(), "d", Map::new(), Arc::new(FailingRegistry));
        let err = entry
            .dispatch(json!({"limit": 5, "offset": 0}))
            .await
            .unwrap_err();
        match err {
            Error::Dispatch { action, message } => {
                assert_eq!(action, "users.list");
                assert_eq!(message, "service unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_rejects_invalid_arguments() {
        let entry = ToolEntry::new(
            "get_user_list",
            &list_action(),
            "d",
            overrides(json!({"limit": 10})),
            Arc::new(FailingRegistry),
        );

        // the registry would fail, so reaching it would surface a Dispatch error
        let err = entry.dispatch(json!({"offset": "twenty"})).await.unwrap_err();
        match err {
            Error::Validation(message) => {
                assert!(message.contains("get_user_list"));
                assert!(message.contains("field 'offset'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let err = entry.dispatch(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("missing required field: offset")));

        let err = entry.dispatch(json!({"offset": 1, "q": null})).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_overridden_fields_may_be_omitted() {
        let entry = ToolEntry::new(
            "get_user_list",
            &list_action(),
            "d",
            overrides(json!({"limit": 10})),
            echo_registry(),
        );
        assert!(entry.validate_arguments(&json!({"offset": 0})).is_ok());
        assert!(entry.validate_arguments(&Value::Null).is_err());
        assert!(entry.validate_arguments(&json!("x")).is_err());
    }

    #[test]
    fn test_response_serialization() {
        let response = ToolResponse::text("ok");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"content": [{"type": "text", "text": "ok"}]})
        );
    }

    #[test]
    fn test_listing_shape() {
        let entry = ToolEntry::new("users_list", &list_action(), "List", Map::new(), echo_registry());
        let listing = entry.to_listing();
        assert_eq!(listing["name"], "users_list");
        assert_eq!(listing["inputSchema"]["type"], "object");
        assert_eq!(listing["inputSchema"]["required"], json!(["limit", "offset"]));
    }
}
