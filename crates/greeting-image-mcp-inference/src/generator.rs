//! Prompt → base64 PNG orchestration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use greeting_image_mcp_core::{
    timestamp_now, Annotations, ImageSettings, Language, ToolOutput, IMAGE_PNG, PRIORITY_HIGH,
    PRIORITY_IMAGE,
};

use crate::backend::{TextToImageBackend, TextToImageRequest};
use crate::client::HfRouterClient;
use crate::error::{InferenceError, Result};
use crate::payload::{decode, encode_base64};

/// A generated image ready to be returned to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes
    pub data: String,
    /// Model that produced it
    pub model: String,
    /// Provider that ran the model
    pub provider: String,
}

/// Runs text-to-image generations against a backend.
#[derive(Clone)]
pub struct ImageGenerator {
    backend: Arc<dyn TextToImageBackend>,
    settings: ImageSettings,
    token: Option<String>,
}

impl fmt::Debug for ImageGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageGenerator")
            .field("backend", &self.backend.name())
            .field("settings", &self.settings)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ImageGenerator {
    /// Create a generator over an explicit backend and credential.
    pub fn new(
        backend: Arc<dyn TextToImageBackend>,
        settings: ImageSettings,
        token: Option<String>,
    ) -> Self {
        Self {
            backend,
            settings,
            token,
        }
    }

    /// Create a generator backed by the inference router, reading the token
    /// from the configured environment variable.
    pub fn from_settings(settings: ImageSettings) -> Result<Self> {
        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        let client = HfRouterClient::new(settings.endpoint.clone(), timeout)?;
        let token = settings.token_from_env();
        Ok(Self::new(Arc::new(client), settings, token))
    }

    /// Whether an API token is configured.
    pub fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    /// Settings in use.
    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Generate an image for `prompt`.
    ///
    /// Fails with [`InferenceError::MissingCredential`] before any network
    /// call when no token is configured.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| InferenceError::MissingCredential {
                env_var: self.settings.token_env.clone(),
            })?;

        if prompt.is_empty() {
            return Err(InferenceError::EmptyPrompt);
        }

        let request = TextToImageRequest::from_settings(prompt, &self.settings);
        info!(
            "Generating image: model={}, provider={}, backend={}",
            request.model,
            request.provider,
            self.backend.name()
        );

        let response = self.backend.text_to_image(token, &request).await?;
        let payload = decode(&response)?;
        debug!("Normalizing {} payload", payload.kind());
        let bytes = payload.into_bytes(self.backend.as_ref(), token).await?;

        info!("Image generated: {} bytes", bytes.len());

        Ok(GeneratedImage {
            data: encode_base64(&bytes),
            model: request.model,
            provider: request.provider,
        })
    }

    /// Generate an image and wrap it as tool output with its annotations.
    pub async fn generate_output(&self, prompt: &str) -> Result<ToolOutput> {
        let image = self.generate(prompt).await?;

        let annotations = Annotations::for_user(PRIORITY_IMAGE)
            .with_metadata("prompt", prompt)
            .with_metadata("model", image.model.as_str())
            .with_metadata("provider", image.provider.as_str())
            .with_metadata("timestamp", timestamp_now());

        Ok(ToolOutput::image(image.data, IMAGE_PNG).with_annotations(annotations))
    }
}

/// Render a generation failure as a user-facing text result.
pub fn error_output(error: &InferenceError, language: Language) -> ToolOutput {
    ToolOutput::text(format!("{}: {}", language.image_error_prefix(), error))
        .with_annotations(Annotations::for_user(PRIORITY_HIGH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::UpstreamResponse;
    use crate::mock::MockBackend;
    use greeting_image_mcp_core::ContentBlock;
    use serde_json::json;

    const BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

    fn generator(backend: Arc<MockBackend>, token: Option<&str>) -> ImageGenerator {
        ImageGenerator::new(backend, ImageSettings::default(), token.map(str::to_string))
    }

    #[tokio::test]
    async fn test_missing_credential_skips_backend() {
        let backend = Arc::new(MockBackend::responding(UpstreamResponse::new(
            "image/png",
            BYTES,
        )));
        let generator = generator(backend.clone(), None);

        let err = generator.generate("a cat").await.unwrap_err();
        assert!(matches!(err, InferenceError::MissingCredential { .. }));
        assert!(err.to_string().contains("HF_TOKEN"));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_uses_fixed_model_and_steps() {
        let backend = Arc::new(MockBackend::responding(UpstreamResponse::new(
            "image/png",
            BYTES,
        )));
        let generator = generator(backend.clone(), Some("hf_test"));

        generator.generate("Astronaut riding a horse").await.unwrap();

        let request = backend.last_request().unwrap();
        assert_eq!(request.prompt, "Astronaut riding a horse");
        assert_eq!(request.model, "black-forest-labs/FLUX.1-schnell");
        assert_eq!(request.provider, "fal-ai");
        assert_eq!(request.num_inference_steps, 5);
    }

    #[tokio::test]
    async fn test_output_is_identical_across_shapes() {
        let encoded = encode_base64(BYTES);
        let responses = [
            UpstreamResponse::new("image/png", BYTES),
            UpstreamResponse::json(&json!(encoded)),
            UpstreamResponse::new("application/octet-stream", BYTES),
        ];

        let mut outputs = Vec::new();
        for response in responses {
            let backend = Arc::new(MockBackend::responding(response));
            let image = generator(backend, Some("hf_test"))
                .generate("x")
                .await
                .unwrap();
            outputs.push(image.data);
        }

        assert!(outputs.iter().all(|data| data == &encoded));
    }

    #[tokio::test]
    async fn test_blob_like_is_fetched() {
        let backend = Arc::new(
            MockBackend::responding(UpstreamResponse::json(
                &json!({"images": [{"url": "https://cdn.example.com/1.png"}]}),
            ))
            .with_hosted(
                "https://cdn.example.com/1.png",
                UpstreamResponse::new("image/png", BYTES),
            ),
        );

        let image = generator(backend, Some("hf_test"))
            .generate("x")
            .await
            .unwrap();
        assert_eq!(image.data, encode_base64(BYTES));
    }

    #[tokio::test]
    async fn test_unrecognized_shape_is_error() {
        let backend = Arc::new(MockBackend::responding(UpstreamResponse::json(&json!(42))));
        let err = generator(backend, Some("hf_test"))
            .generate("x")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unexpected image format received from API: number"
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error() {
        let backend = Arc::new(MockBackend::failing(500, "boom"));
        let err = generator(backend, Some("hf_test"))
            .generate("x")
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_generate_output_annotations() {
        let backend = Arc::new(MockBackend::responding(UpstreamResponse::new(
            "image/png",
            BYTES,
        )));
        let output = generator(backend, Some("hf_test"))
            .generate_output("a red fox")
            .await
            .unwrap();

        assert_eq!(
            output.content,
            vec![ContentBlock::image(encode_base64(BYTES), "image/png")]
        );
        let annotations = output.annotations.unwrap();
        assert_eq!(annotations.priority, PRIORITY_IMAGE);
        assert_eq!(annotations.metadata["prompt"], "a red fox");
        assert_eq!(annotations.metadata["model"], "black-forest-labs/FLUX.1-schnell");
        assert_eq!(annotations.metadata["provider"], "fal-ai");
        assert!(annotations.metadata.contains_key("timestamp"));
    }

    #[test]
    fn test_error_output_is_text() {
        let err = InferenceError::MissingCredential {
            env_var: "HF_TOKEN".to_string(),
        };

        let output = error_output(&err, Language::Ko);
        assert_eq!(output.content.len(), 1);
        assert_eq!(
            output.content[0].as_text(),
            Some("이미지 생성 중 오류가 발생했습니다: HF_TOKEN environment variable is not set")
        );
        assert_eq!(output.annotations.unwrap().priority, PRIORITY_HIGH);

        let output = error_output(&err, Language::En);
        assert!(output.content[0]
            .as_text()
            .unwrap()
            .starts_with("An error occurred while generating the image"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let generator = generator(Arc::new(MockBackend::new()), Some("hf_secret"));
        let debug = format!("{generator:?}");
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
