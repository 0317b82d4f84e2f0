//! Configuration types for the greeting/image MCP server.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Language};

/// Server configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Server settings
    pub server: ServerSettings,
    /// Image generation settings
    pub image: ImageSettings,
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::Config("server.name cannot be empty".to_string()));
        }

        self.image.validate()
    }
}

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Name advertised to clients
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "greeting-image-mcp-server".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Image generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Base URL of the inference router
    pub endpoint: String,
    /// Inference provider id
    pub provider: String,
    /// Text-to-image model id
    pub model: String,
    /// Denoising steps requested from the model
    pub num_inference_steps: u32,
    /// Environment variable holding the API token
    pub token_env: String,
    /// Language of error messages returned by the image tool
    pub error_language: Language,
    /// Upper bound for one upstream call in seconds (unset = no deadline)
    pub request_timeout_secs: Option<u64>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co".to_string(),
            provider: "fal-ai".to_string(),
            model: "black-forest-labs/FLUX.1-schnell".to_string(),
            num_inference_steps: 5,
            token_env: "HF_TOKEN".to_string(),
            error_language: Language::Ko,
            request_timeout_secs: None,
        }
    }
}

impl ImageSettings {
    /// Validate the image section.
    pub fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("image.provider", &self.provider),
            ("image.model", &self.model),
            ("image.token_env", &self.token_env),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{field} cannot be empty")));
            }
        }

        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "image.endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.num_inference_steps == 0 {
            return Err(Error::Config(
                "image.num_inference_steps must be > 0".to_string(),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config(
                "image.request_timeout_secs must be > 0 when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Read the API token from the configured environment variable.
    ///
    /// Empty values count as unset.
    pub fn token_from_env(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
