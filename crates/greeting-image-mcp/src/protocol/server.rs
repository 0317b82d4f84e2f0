//! Greeting/Image MCP Server Implementation
//!
//! This module implements the MCP server using rmcp 0.9's #[tool_router] and
//! #[prompt_router] patterns. Resources are served from a [`ResourceRegistry`].

use std::sync::Arc;

use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use greeting_image_mcp_core::{greeting, ServerConfig, Uptime};
use greeting_image_mcp_inference::{error_output, ImageGenerator, InferenceError};

use crate::prompts::{code_review_text, CodeReviewArgs};
use crate::resources::{ResourceContext, ResourceRegistry};
use crate::tools::*;

/// Greeting/Image MCP Server
///
/// Exposes the greeting and image tools, the server info resources and the
/// code review prompt.
#[derive(Clone)]
pub struct GreetingImageServer {
    /// Active configuration
    config: Arc<ServerConfig>,
    /// Image generation pipeline
    generator: Arc<ImageGenerator>,
    /// Resource registry
    resources: Arc<ResourceRegistry>,
    /// Process start
    uptime: Uptime,
    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
    /// Prompt router for handling MCP prompt requests
    prompt_router: PromptRouter<Self>,
}

#[tool_router]
impl GreetingImageServer {
    /// Create a server around an existing image generator.
    pub fn new(config: ServerConfig, generator: ImageGenerator) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
            resources: Arc::new(ResourceRegistry::builtin()),
            uptime: Uptime::start(),
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    /// Create a server whose image generator talks to the configured endpoint.
    pub fn from_config(config: ServerConfig) -> Result<Self, InferenceError> {
        let generator = ImageGenerator::from_settings(config.image.clone())?;
        Ok(Self::new(config, generator))
    }

    /// Whether the image tool has a credential to work with.
    pub fn has_image_credential(&self) -> bool {
        self.generator.has_credential()
    }

    /// Names of the registered tools, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Names of the registered prompts, sorted.
    pub fn prompt_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .prompt_router
            .list_all()
            .into_iter()
            .map(|prompt| prompt.name.to_string())
            .collect();
        names.sort();
        names
    }

    fn resource_context(&self) -> ResourceContext<'_> {
        ResourceContext {
            config: &self.config,
            uptime: &self.uptime,
            tools: self.tool_names(),
            resources: self.resources.uris(),
            prompts: self.prompt_names(),
        }
    }

    /// Resource listing in protocol form.
    pub fn resource_list(&self) -> Vec<Resource> {
        self.resources
            .definitions()
            .iter()
            .map(|definition| {
                let mut raw = RawResource::new(definition.uri, definition.name);
                raw.description = Some(definition.description.to_string());
                raw.mime_type = Some(definition.mime_type.to_string());
                raw.no_annotation()
            })
            .collect()
    }

    /// Render the resource at `uri`.
    pub fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let definition = self.resources.get(uri).ok_or_else(|| {
            debug!("Unknown resource requested: {}", uri);
            McpError::resource_not_found(
                format!("Resource '{uri}' not found"),
                Some(json!({ "uri": uri })),
            )
        })?;

        let text = definition
            .render(&self.resource_context())
            .map_err(|e| {
                error!("Failed to render resource '{}': {}", uri, e);
                McpError::internal_error(format!("Failed to render resource: {e}"), None)
            })?;

        let mut contents = ResourceContents::text(text, definition.uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(definition.mime_type.to_string());
        }

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }

    /// Greet someone in one of the supported languages
    #[tool(description = "Greet someone in English, Korean or Japanese")]
    #[instrument(skip_all)]
    async fn greeting(
        &self,
        Parameters(params): Parameters<GreetingParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Greeting: language={}", params.language);

        Ok(into_call_result(greeting(&params.name, params.language)))
    }

    /// Generate an image from a text prompt
    #[tool(description = "Generate a base64-encoded PNG from a text prompt with FLUX.1-schnell")]
    #[instrument(skip_all)]
    async fn generate_image(
        &self,
        Parameters(params): Parameters<GenerateImageParams>,
    ) -> Result<CallToolResult, McpError> {
        info!("Image requested: prompt_len={}", params.prompt.len());

        let output = match self.generator.generate_output(params.prompt.as_str()).await {
            Ok(output) => output,
            Err(e) => {
                error!("Image generation failed: {}", e);
                error_output(&e, self.config.image.error_language)
            }
        };

        Ok(into_call_result(output))
    }
}

#[prompt_router]
impl GreetingImageServer {
    /// Ask for a structured review of a piece of code
    #[prompt(name = "code_review", description = "Comprehensive Code Review")]
    async fn code_review(
        &self,
        Parameters(args): Parameters<CodeReviewArgs>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("Building code review prompt: code_len={}", args.code.len());

        Ok(GetPromptResult {
            description: Some("Comprehensive Code Review".to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                code_review_text(&args.code),
            )],
        })
    }
}

// Implement the ServerHandler trait to define server capabilities
#[tool_handler]
#[prompt_handler]
impl rmcp::ServerHandler for GreetingImageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Greeting/Image MCP Server - Greet people in English, Korean or Japanese \
                 with the greeting tool and create images from text with generate_image. \
                 Read server://info or server://detailed-info for server details and use \
                 the code_review prompt for structured code reviews."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(self.resource_list()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.read(&request.uri)
    }
}
