//! # Greeting/Image MCP Server
//!
//! Model Context Protocol server offering multilingual greetings and AI image
//! generation.
//!
//! ## Overview
//!
//! This server provides:
//! - Tools: `greeting` (en/ko/ja) and `generate_image` (text-to-image)
//! - Resources: `server://info` and `server://detailed-info`
//! - Prompts: `code_review`
//!
//! ## Architecture
//!
//! This is Layer 2 - the main MCP server binary that ties together:
//! - greeting-image-mcp-core: Core types and configuration
//! - greeting-image-mcp-inference: Image generation

use anyhow::Context;
use greeting_image_mcp::{CliArgs, GreetingImageServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = CliArgs::from_env()?;
    let config = args.load_config().with_context(|| match &args.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load default configuration".to_string(),
    })?;

    // Initialize logging; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(
        "{} v{} starting...",
        config.server.name,
        env!("CARGO_PKG_VERSION")
    );

    let token_env = config.image.token_env.clone();
    let server = GreetingImageServer::from_config(config)?;

    if !server.has_image_credential() {
        tracing::warn!(
            "{} environment variable is not set. Image generation will not work.",
            token_env
        );
    }

    tracing::info!("Server initialized, starting stdio transport...");

    // Serve the MCP server over stdio
    let service = server.serve(stdio()).await.map_err(|e| {
        tracing::error!("Error starting server: {}", e);
        e
    })?;

    tracing::info!(
        "Greeting/Image MCP Server running on stdio (English, Korean, Japanese + image generation)"
    );

    // Wait for the service to complete
    service.waiting().await?;

    tracing::info!("Greeting/Image MCP Server shutting down");

    Ok(())
}
