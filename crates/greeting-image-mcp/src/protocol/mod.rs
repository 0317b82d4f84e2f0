//! MCP Protocol Layer
//!
//! This module implements the Model Context Protocol server using rmcp 0.9.
//! It exposes the greeting and image capabilities as MCP tools, the server
//! info documents as resources and the code review template as a prompt.

pub mod server;

pub use server::GreetingImageServer;
