//! The seam between the image tool and whatever produces images.

use async_trait::async_trait;
use serde::Serialize;

use greeting_image_mcp_core::ImageSettings;

use crate::error::Result;

/// One text-to-image call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextToImageRequest {
    /// Prompt describing the image
    pub prompt: String,
    /// Model id, e.g. `black-forest-labs/FLUX.1-schnell`
    pub model: String,
    /// Provider id, e.g. `fal-ai`
    pub provider: String,
    /// Denoising steps
    pub num_inference_steps: u32,
}

impl TextToImageRequest {
    /// Build a request for `prompt` using the configured model and provider.
    pub fn from_settings(prompt: impl Into<String>, settings: &ImageSettings) -> Self {
        Self {
            prompt: prompt.into(),
            model: settings.model.clone(),
            provider: settings.provider.clone(),
            num_inference_steps: settings.num_inference_steps,
        }
    }
}

/// A raw upstream response before it is decoded into an image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// Value of the `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Create a response with the given content type.
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            body: body.into(),
        }
    }

    /// Create a response without a content type.
    pub fn untyped(body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: None,
            body: body.into(),
        }
    }

    /// JSON response from a serializable value.
    pub fn json(value: &serde_json::Value) -> Self {
        Self::new("application/json", value.to_string())
    }

    /// Media type without parameters, lowercased (`image/png; x=y` → `image/png`).
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }
}

/// Something that turns prompts into images.
#[async_trait]
pub trait TextToImageBackend: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Run one generation. `token` is the caller's API credential.
    async fn text_to_image(
        &self,
        token: &str,
        request: &TextToImageRequest,
    ) -> Result<UpstreamResponse>;

    /// Retrieve the bytes behind a hosted image URL.
    async fn fetch(&self, token: &str, url: &str) -> Result<UpstreamResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_default_settings() {
        let request = TextToImageRequest::from_settings("a cat", &ImageSettings::default());
        assert_eq!(request.prompt, "a cat");
        assert_eq!(request.model, "black-forest-labs/FLUX.1-schnell");
        assert_eq!(request.provider, "fal-ai");
        assert_eq!(request.num_inference_steps, 5);
    }

    #[test]
    fn test_media_type_strips_parameters() {
        let response = UpstreamResponse::new("Image/PNG; charset=binary", vec![1]);
        assert_eq!(response.media_type().as_deref(), Some("image/png"));
        assert_eq!(UpstreamResponse::untyped(vec![1]).media_type(), None);
    }
}
