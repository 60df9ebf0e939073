//! Configuration structures.
//!
//! The settings document is JSON. Every section has a default, so an empty
//! document (`{}`) exposes every action under its generated name.

use crate::types::{Error, Result};
use crate::validation::validate_non_empty;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Global bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Action allow-patterns: `"*"`, `"prefix.*"` or an exact action name.
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,

    /// Hand-named tools. These claim their action before generated names are assigned.
    #[serde(default)]
    pub tools: Vec<CustomToolSpec>,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_allow() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow: default_allow(),
            tools: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Parse a configuration document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::config(format!("invalid config: {}", e)))
    }

    /// Load and validate a configuration file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.allow {
            validate_non_empty(pattern, "allow pattern")?;
        }
        for (i, tool) in self.tools.iter().enumerate() {
            validate_non_empty(&tool.name, &format!("tools[{}].name", i))?;
            validate_non_empty(&tool.action, &format!("tools[{}].action", i))?;
            validate_non_empty(&tool.description, &format!("tools[{}].description", i))?;
        }
        Ok(())
    }

    /// JSON Schema of the configuration document.
    pub fn json_schema() -> Value {
        let schema = schemars::schema_for!(Config);
        serde_json::to_value(schema).unwrap_or(Value::Null)
    }
}

/// A hand-named tool bound to one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomToolSpec {
    /// Requested tool name (sanitized before use).
    pub name: String,

    /// Target action name.
    pub action: String,

    /// Description shown to protocol clients, used verbatim.
    pub description: String,

    /// Values pinned into every call. They win over caller arguments.
    #[serde(default)]
    pub params: Map<String, Value>,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config.allow, vec!["*"]);
        assert!(config.tools.is_empty());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_custom_tool_params_default_empty() {
        let config = Config::from_json_str(
            r#"{"allow": ["users.*"], "tools": [
                {"name": "list_users", "action": "users.list", "description": "List users"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.tools.len(), 1);
        assert!(config.tools[0].params.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = Config::from_json_str("{allow").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let mut config = Config::default();
        config.tools.push(CustomToolSpec {
            name: "t".to_string(),
            action: String::new(),
            description: "d".to_string(),
            params: Map::new(),
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tools[0].action"));

        let config = Config {
            allow: vec![String::new()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = Config::json_schema();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("allow"));
        assert!(props.contains_key("tools"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"allow": ["math.*"], "tools": [{{"name": "add", "action": "math.add", "description": "Add", "params": {{"b": 1}}}}]}}"#
        )
        .unwrap();

        let config = Config::load(file.path()).await.unwrap();
        assert_eq!(config.allow, vec!["math.*"]);
        assert_eq!(config.tools[0].params["b"], 1);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Config::load("/nonexistent/bridge.json").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
