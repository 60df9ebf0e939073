//! Tool infrastructure — allow-list, catalogue building, tool entries.
//!
//! The bridge owns tool *metadata* and dispatch wiring; the action registry
//! keeps the implementations.

pub mod access;
pub mod catalog;
pub mod entry;

pub use access::{AllowList, AllowPattern};
pub use catalog::{describe_action, CatalogueBuilder, ToolCatalogue};
pub use entry::{ToolContent, ToolEntry, ToolResponse};
