//! Bridge façade — the surface a protocol server talks to.
//!
//! Holds the registry handle, the configuration and the current catalogue
//! snapshot. Catalogues are rebuilt from scratch on [`ActionBridge::refresh`]
//! and swapped in whole; readers never observe a half-built catalogue.

use crate::registry::ActionRegistry;
use crate::tools::{CatalogueBuilder, ToolCatalogue, ToolEntry, ToolResponse};
use crate::types::{Config, Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct ActionBridge {
    registry: Arc<dyn ActionRegistry>,
    config: Config,
    catalogue: RwLock<Arc<ToolCatalogue>>,
}

impl ActionBridge {
    /// Create a bridge with an empty catalogue. Call [`refresh`](Self::refresh)
    /// once the registry is ready.
    pub fn new(registry: Arc<dyn ActionRegistry>, config: Config) -> Self {
        Self {
            registry,
            config,
            catalogue: RwLock::new(Arc::new(ToolCatalogue::new())),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rebuild the catalogue from the registry's current action list.
    ///
    /// Returns the number of tools. On failure the previous catalogue stays
    /// in place.
    pub async fn refresh(&self) -> Result<usize> {
        let actions = self.registry.list_actions().await?;
        let catalogue =
            CatalogueBuilder::new(&self.config, Arc::clone(&self.registry)).build(&actions)?;
        let count = catalogue.len();

        *self.catalogue.write().await = Arc::new(catalogue);
        Ok(count)
    }

    /// Current catalogue.
    pub async fn catalogue(&self) -> Arc<ToolCatalogue> {
        Arc::clone(&*self.catalogue.read().await)
    }

    /// Snapshot copy of the tool map.
    pub async fn get_tools(&self) -> HashMap<String, ToolEntry> {
        self.catalogue.read().await.tools()
    }

    /// Invoke a tool by name.
    pub async fn call_tool(&self, tool_name: &str, args: Value) -> Result<ToolResponse> {
        let entry = self
            .catalogue
            .read()
            .await
            .get(tool_name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Unknown tool: {}", tool_name)))?;

        entry.dispatch(args).await
    }
}

impl std::fmt::Debug for ActionBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionBridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ActionDescriptor, StaticActionRegistry};
    use serde_json::json;

    fn bridge(config: Config) -> ActionBridge {
        let registry = StaticActionRegistry::new(vec![
            ActionDescriptor::new("users.list"),
            ActionDescriptor::new("posts.create"),
        ]);
        ActionBridge::new(Arc::new(registry), config)
    }

    #[tokio::test]
    async fn test_empty_until_refreshed() {
        let bridge = bridge(Config::default());
        assert!(bridge.get_tools().await.is_empty());

        assert_eq!(bridge.refresh().await.unwrap(), 2);
        assert_eq!(bridge.catalogue().await.names(), vec!["posts_create", "users_list"]);
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let bridge = bridge(Config::default());
        bridge.refresh().await.unwrap();

        let err = bridge.call_tool("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_call_tool_forwards() {
        let bridge = bridge(Config::default());
        bridge.refresh().await.unwrap();

        let response = bridge.call_tool("users_list", json!({"page": 2})).await.unwrap();
        assert!(response.joined_text().contains("\"page\": 2"));
    }
}
