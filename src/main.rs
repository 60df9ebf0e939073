//! Action bridge introspection CLI.
//!
//! Builds the tool catalogue from a JSON action list and a bridge config:
//! - `tools`: print the tool listing (name, description, inputSchema)
//! - `call`: dry-run a tool call and print the forwarded arguments
//! - `config-schema`: print the JSON Schema of the config document

use clap::{Parser, Subcommand};
use mcp_action_bridge::{ActionBridge, Config, StaticActionRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "mcp-action-bridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the tool catalogue as JSON.
    Tools {
        /// JSON file with an array of `{name, params}` action descriptors.
        #[arg(long, env = "MCP_BRIDGE_ACTIONS")]
        actions: PathBuf,

        /// Bridge configuration file.
        #[arg(long, env = "MCP_BRIDGE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Dispatch a tool against the dry-run registry.
    Call {
        /// Tool name.
        tool: String,

        #[arg(long, env = "MCP_BRIDGE_ACTIONS")]
        actions: PathBuf,

        #[arg(long, env = "MCP_BRIDGE_CONFIG")]
        config: Option<PathBuf>,

        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print the JSON Schema of the configuration document.
    ConfigSchema,
}

async fn load_config(path: Option<&Path>) -> mcp_action_bridge::Result<Config> {
    match path {
        Some(path) => Config::load(path).await,
        None => Ok(Config::default()),
    }
}

async fn build_bridge(
    actions: &Path,
    config: Option<&Path>,
) -> Result<ActionBridge, Box<dyn std::error::Error>> {
    let config = load_config(config).await?;
    mcp_action_bridge::observability::init_tracing(&config.observability);

    let registry = StaticActionRegistry::load(actions).await?;
    let bridge = ActionBridge::new(Arc::new(registry), config);
    bridge.refresh().await?;
    Ok(bridge)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tools { actions, config } => {
            let bridge = build_bridge(&actions, config.as_deref()).await?;
            let listing = bridge.catalogue().await.describe();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        Command::Call {
            tool,
            actions,
            config,
            args,
        } => {
            let bridge = build_bridge(&actions, config.as_deref()).await?;
            let args: serde_json::Value = serde_json::from_str(&args)?;
            let response = bridge.call_tool(&tool, args).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::ConfigSchema => {
            println!("{}", serde_json::to_string_pretty(&Config::json_schema())?);
        }
    }

    Ok(())
}
