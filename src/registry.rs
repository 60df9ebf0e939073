//! Action registry collaborator.
//!
//! The registry is the service broker side of the bridge: it lists the
//! actions currently known to the cluster and performs remote calls. The
//! bridge never talks to the transport directly.

use crate::types::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A remotely callable action as listed by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Dot-delimited action name, e.g. `users.list` or `$node.services`.
    pub name: String,

    /// Raw parameter schema, if the action declares one.
    #[serde(default, alias = "paramsSchema", skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl ActionDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }
}

/// Service broker interface consumed by the bridge.
#[async_trait]
pub trait ActionRegistry: Send + Sync {
    /// List the currently registered actions.
    ///
    /// Fails with [`Error::NotReady`] until the transport reports itself ready.
    async fn list_actions(&self) -> Result<Vec<ActionDescriptor>>;

    /// Call an action. Errors are surfaced to the tool caller unchanged.
    async fn call(&self, action: &str, params: Value) -> Result<Value>;
}

/// Fixed, in-memory action list.
///
/// `call` never leaves the process: it echoes the action name and the final
/// parameters back, which makes it a dry-run registry for previewing how a
/// tool call would be forwarded.
#[derive(Debug, Clone, Default)]
pub struct StaticActionRegistry {
    actions: Vec<ActionDescriptor>,
}

impl StaticActionRegistry {
    pub fn new(actions: Vec<ActionDescriptor>) -> Self {
        Self { actions }
    }

    /// Parse a JSON array of action descriptors.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let actions: Vec<ActionDescriptor> = serde_json::from_str(raw)?;
        Ok(Self::new(actions))
    }

    /// Load a JSON array of action descriptors from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&raw)
    }

    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }
}

#[async_trait]
impl ActionRegistry for StaticActionRegistry {
    async fn list_actions(&self) -> Result<Vec<ActionDescriptor>> {
        Ok(self.actions.clone())
    }

    async fn call(&self, action: &str, params: Value) -> Result<Value> {
        if !self.actions.iter().any(|a| a.name == action) {
            return Err(Error::dispatch(action, "action is not registered"));
        }
        Ok(serde_json::json!({
            "action": action,
            "params": params,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_accepts_params_schema_alias() {
        let actions: Vec<ActionDescriptor> = serde_json::from_value(json!([
            {"name": "users.get", "paramsSchema": {"id": "number"}},
            {"name": "users.list", "params": {"limit": "number"}},
            {"name": "$node.list"}
        ]))
        .unwrap();

        assert_eq!(actions[0].params, Some(json!({"id": "number"})));
        assert_eq!(actions[1].params, Some(json!({"limit": "number"})));
        assert_eq!(actions[2].params, None);
    }

    #[test]
    fn test_static_registry_lists_in_order() {
        let registry = StaticActionRegistry::from_json_str(
            r#"[{"name": "b.one"}, {"name": "a.two"}]"#,
        )
        .unwrap();
        let names: Vec<String> = tokio_test::block_on(registry.list_actions())
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["b.one", "a.two"]);
    }

    #[test]
    fn test_static_registry_echoes_calls() {
        let registry = StaticActionRegistry::new(vec![ActionDescriptor::new("math.add")]);
        let result =
            tokio_test::block_on(registry.call("math.add", json!({"a": 1, "b": 2}))).unwrap();
        assert_eq!(result, json!({"action": "math.add", "params": {"a": 1, "b": 2}}));

        let err = tokio_test::block_on(registry.call("math.sub", json!({}))).unwrap_err();
        assert!(matches!(err, Error::Dispatch { .. }));
    }

    #[test]
    fn test_invalid_action_list() {
        assert!(StaticActionRegistry::from_json_str("{}").is_err());
    }
}
