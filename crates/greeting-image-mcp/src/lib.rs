//! Greeting/Image MCP Server Library
//!
//! This library contains the MCP protocol layer types and handlers.
//! The actual server binary is in main.rs.

pub mod cli;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod tools;

// Re-export commonly used types
pub use cli::{CliArgs, CliError};
pub use protocol::GreetingImageServer;
pub use resources::{ResourceDefinition, ResourceRegistry};
pub use tools::*;
