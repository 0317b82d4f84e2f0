//! MCP Resources
//!
//! A small registry mapping resource URIs to display metadata and a
//! producer that renders a fresh JSON document on every read.

use serde_json::{json, Map, Value};

use greeting_image_mcp_core::runtime::{
    format_megabytes, format_uptime, local_timezone, RUNTIME_VERSION,
};
use greeting_image_mcp_core::{
    timestamp_now, Language, MemoryUsage, Platform, Result, ServerConfig, Uptime,
};

/// URI of the basic server information resource.
pub const SERVER_INFO_URI: &str = "server://info";

/// URI of the detailed server information resource.
pub const DETAILED_INFO_URI: &str = "server://detailed-info";

const JSON_MIME: &str = "application/json";

/// Areas covered by the `code_review` prompt, as listed in the detailed info.
pub const REVIEW_AREAS: [&str; 5] = [
    "Code structure and design",
    "Code quality and naming",
    "Performance optimization",
    "Security considerations",
    "Readability and maintainability",
];

/// Everything a resource producer may look at.
#[derive(Debug, Clone)]
pub struct ResourceContext<'a> {
    /// Active configuration
    pub config: &'a ServerConfig,
    /// Process uptime
    pub uptime: &'a Uptime,
    /// Registered tool names
    pub tools: Vec<String>,
    /// Registered resource URIs
    pub resources: Vec<String>,
    /// Registered prompt names
    pub prompts: Vec<String>,
}

/// Renders a resource document.
pub type Producer = fn(&ResourceContext<'_>) -> Value;

/// A registered resource.
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    /// Unique URI
    pub uri: &'static str,
    /// Display name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// MIME type of the rendered document
    pub mime_type: &'static str,
    producer: Producer,
}

impl ResourceDefinition {
    /// Define a JSON resource.
    pub fn json(
        uri: &'static str,
        name: &'static str,
        description: &'static str,
        producer: Producer,
    ) -> Self {
        Self {
            uri,
            name,
            description,
            mime_type: JSON_MIME,
            producer,
        }
    }

    /// Render the document.
    pub fn produce(&self, ctx: &ResourceContext<'_>) -> Value {
        (self.producer)(ctx)
    }

    /// Render the document as pretty-printed JSON text.
    pub fn render(&self, ctx: &ResourceContext<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.produce(ctx))?)
    }
}

/// Registered resources, in registration order.
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    definitions: Vec<ResourceDefinition>,
}

impl ResourceRegistry {
    /// Registry holding `server://info` and `server://detailed-info`.
    pub fn builtin() -> Self {
        Self {
            definitions: vec![
                ResourceDefinition::json(
                    SERVER_INFO_URI,
                    "서버 정보",
                    "Multilingual Greeting MCP Server 정보",
                    server_info,
                ),
                ResourceDefinition::json(
                    DETAILED_INFO_URI,
                    "상세 서버 정보",
                    "Greeting MCP Server의 상세한 기능 및 상태 정보",
                    detailed_info,
                ),
            ],
        }
    }

    /// Look up a resource by URI.
    pub fn get(&self, uri: &str) -> Option<&ResourceDefinition> {
        self.definitions.iter().find(|d| d.uri == uri)
    }

    /// All definitions.
    pub fn definitions(&self) -> &[ResourceDefinition] {
        &self.definitions
    }

    /// Registered URIs.
    pub fn uris(&self) -> Vec<String> {
        self.definitions.iter().map(|d| d.uri.to_string()).collect()
    }
}

/// `server://info`
pub fn server_info(ctx: &ResourceContext<'_>) -> Value {
    let supported: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
    let platform = Platform::detect();

    json!({
        "name": ctx.config.server.name,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "다국어 인사 및 AI 이미지 생성 MCP 서버 (영어, 한국어, 일본어 지원)",
        "supportedLanguages": supported,
        "timestamp": timestamp_now(),
        "uptime": ctx.uptime.seconds(),
        "runtimeVersion": RUNTIME_VERSION,
        "nodeVersion": RUNTIME_VERSION,
        "platform": platform.id(),
    })
}

/// `server://detailed-info`
pub fn detailed_info(ctx: &ResourceContext<'_>) -> Value {
    let image = &ctx.config.image;
    let memory = MemoryUsage::current();

    let mut languages = Map::new();
    for language in Language::ALL {
        languages.insert(
            language.code().to_string(),
            json!({
                "name": language.display_name(),
                "example": language.template(),
                "emoji": language.emoji(),
            }),
        );
    }

    let mut examples: Vec<Value> = [
        ("Alice", Language::En, "Basic English greeting"),
        ("철수", Language::Ko, "Korean greeting"),
        ("田中", Language::Ja, "Japanese greeting"),
    ]
    .into_iter()
    .map(|(name, language, description)| {
        json!({
            "tool": "greeting",
            "description": description,
            "command": format!("greeting(name=\"{name}\", language=\"{language}\")"),
            "expectedOutput": language.greet(name),
        })
    })
    .collect();
    examples.push(json!({
        "tool": "generate_image",
        "description": "AI image generation",
        "command": "generate_image(prompt=\"Astronaut riding a horse\")",
        "expectedOutput": "base64-encoded PNG image",
    }));

    json!({
        "server": {
            "name": ctx.config.server.name,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "다국어 인사 및 AI 이미지 생성 MCP 서버",
            "author": "MCP Developer",
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "capabilities": {
            "tools": { "count": ctx.tools.len(), "available": ctx.tools },
            "resources": { "count": ctx.resources.len(), "available": ctx.resources },
            "prompts": { "count": ctx.prompts.len(), "available": ctx.prompts },
        },
        "tools": {
            "greeting": {
                "description": "다국어 인사 도구",
                "parameters": {
                    "name": {
                        "type": "string",
                        "required": true,
                        "description": "인사할 사람의 이름",
                    },
                    "language": {
                        "type": "enum",
                        "required": false,
                        "default": Language::default().code(),
                        "options": Language::ALL.iter().map(|l| l.code()).collect::<Vec<_>>(),
                        "description": "인사 언어 (en: 영어, ko: 한국어, ja: 일본어)",
                    },
                },
                "supportedLanguages": languages,
            },
            "generate_image": {
                "description": "AI 이미지 생성 도구",
                "parameters": {
                    "prompt": {
                        "type": "string",
                        "required": true,
                        "description": "이미지 생성을 위한 프롬프트 설명",
                    },
                },
                "model": image.model,
                "provider": image.provider,
                "outputFormat": "base64-encoded image/png",
            },
        },
        "prompts": {
            "code_review": {
                "description": "Comprehensive code review prompt template",
                "parameters": {
                    "code": {
                        "type": "string",
                        "required": true,
                        "description": "The code to review",
                    },
                },
                "reviewAreas": REVIEW_AREAS,
            },
        },
        "runtime": {
            "runtimeVersion": RUNTIME_VERSION,
            "platform": Platform::detect().id(),
            "architecture": std::env::consts::ARCH,
            "uptime": {
                "seconds": ctx.uptime.seconds(),
                "formatted": format_uptime(ctx.uptime.elapsed()),
            },
            "memory": {
                "used": memory.used,
                "total": memory.total,
                "external": memory.external,
                "formatted": {
                    "used": format_megabytes(memory.used),
                    "total": format_megabytes(memory.total),
                },
            },
            "pid": std::process::id(),
        },
        "status": {
            "health": "healthy",
            "ready": true,
            "timestamp": timestamp_now(),
            "timezone": local_timezone(),
        },
        "usage": {
            "examples": examples,
        },
    })
}
