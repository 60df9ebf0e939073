//! Core types for the action bridge.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: The user settings document (allow-patterns, custom tools)

mod config;
mod errors;

pub use config::{Config, CustomToolSpec, ObservabilityConfig};
pub use errors::{Error, Result};
