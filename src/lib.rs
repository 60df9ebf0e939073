//! # MCP Action Bridge
//!
//! Exposes a service broker's remotely callable actions as MCP tools:
//! - Tool name sanitization with per-build collision resolution
//! - Translation of loosely-typed action parameter schemas into validated
//!   input schemas (rendered as JSON Schema)
//! - Allow-list filtering, hand-named custom tools and pinned parameter overrides
//! - Dispatch of tool calls to the underlying action
//!
//! ## Architecture
//!
//! ```text
//!   ActionRegistry ──list_actions──▶ CatalogueBuilder ──▶ ToolCatalogue
//!        ▲                              │        │              │
//!        │                           naming    schema           │
//!        └──────────call──────────── ToolEntry::dispatch ◀──────┘
//! ```
//!
//! [`ActionBridge`] owns the current catalogue snapshot and is what a
//! protocol server holds on to.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod bridge;
pub mod naming;
pub mod registry;
pub mod schema;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;
pub mod validation;

pub use bridge::ActionBridge;
pub use registry::{ActionDescriptor, ActionRegistry, StaticActionRegistry};
pub use tools::{ToolCatalogue, ToolEntry, ToolResponse};
pub use types::{Config, CustomToolSpec, Error, Result};
