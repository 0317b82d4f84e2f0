//! # greeting-image-mcp-core
//!
//! Core types for the greeting/image MCP server.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other greeting-image-mcp crates. It provides:
//!
//! - Supported languages and their greeting templates
//! - The protocol-agnostic tool output model (content blocks, annotations)
//! - Server configuration
//! - Process introspection for the info resources
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other greeting-image-mcp crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod content;
pub mod error;
pub mod greeting;
pub mod language;
pub mod runtime;
pub mod text;

// Re-export commonly used types
pub use config::{ImageSettings, ServerConfig, ServerSettings};
pub use content::{
    iso_timestamp, timestamp_now, Annotations, Audience, ContentBlock, ToolOutput, IMAGE_PNG,
    PRIORITY_HIGH, PRIORITY_IMAGE,
};
pub use error::{Error, Result};
pub use greeting::{greeting, greeting_at};
pub use language::Language;
pub use runtime::{MemoryUsage, Platform, Uptime};
pub use text::NonEmptyString;
