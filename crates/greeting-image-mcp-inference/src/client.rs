//! Hugging Face inference router client.
//!
//! Sends text-to-image requests through `https://router.huggingface.co`,
//! which forwards them to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde_json::{json, Value};
use tracing::debug;

use crate::backend::{TextToImageBackend, TextToImageRequest, UpstreamResponse};
use crate::error::{InferenceError, Result};

/// Longest error body kept in [`InferenceError::Status`].
const MAX_ERROR_BODY: usize = 500;

/// HTTP backend talking to the inference router.
#[derive(Debug, Clone)]
pub struct HfRouterClient {
    client: Arc<Client>,
    endpoint: String,
}

impl HfRouterClient {
    /// Create a client for `endpoint` (router base URL).
    ///
    /// `timeout` bounds every request; `None` means no deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL and JSON body for a request, following the provider's routing scheme.
    pub fn route(&self, request: &TextToImageRequest) -> (String, Value) {
        match request.provider.as_str() {
            "fal-ai" => (
                format!("{}/fal-ai/{}", self.endpoint, fal_model_id(&request.model)),
                json!({
                    "prompt": request.prompt,
                    "num_inference_steps": request.num_inference_steps,
                    "sync_mode": true,
                }),
            ),
            provider => (
                format!("{}/{}/models/{}", self.endpoint, provider, request.model),
                json!({
                    "inputs": request.prompt,
                    "parameters": { "num_inference_steps": request.num_inference_steps },
                }),
            ),
        }
    }

    /// Whether `url` shares the router's scheme, host and port.
    fn is_router_url(&self, url: &str) -> bool {
        match (Url::parse(&self.endpoint), Url::parse(url)) {
            (Ok(endpoint), Ok(url)) => endpoint.origin() == url.origin(),
            _ => false,
        }
    }

    async fn into_upstream(response: Response) -> Result<UpstreamResponse> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        if !status.is_success() {
            let mut text = String::from_utf8_lossy(&body).into_owned();
            if text.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| text.is_char_boundary(i))
                    .unwrap_or(0);
                text.truncate(cut);
            }
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(UpstreamResponse {
            content_type,
            body: body.to_vec(),
        })
    }
}

/// Provider-side id of a Hub model on fal.ai.
fn fal_model_id(model: &str) -> &str {
    match model {
        "black-forest-labs/FLUX.1-schnell" => "fal-ai/flux/schnell",
        "black-forest-labs/FLUX.1-dev" => "fal-ai/flux/dev",
        other => other,
    }
}

#[async_trait]
impl TextToImageBackend for HfRouterClient {
    fn name(&self) -> &str {
        "hf-router"
    }

    async fn text_to_image(
        &self,
        token: &str,
        request: &TextToImageRequest,
    ) -> Result<UpstreamResponse> {
        let (url, body) = self.route(request);
        debug!("POST {} (steps={})", url, request.num_inference_steps);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Self::into_upstream(response).await
    }

    async fn fetch(&self, token: &str, url: &str) -> Result<UpstreamResponse> {
        let mut builder = self.client.get(url);
        // Only send the token back to the router itself.
        if self.is_router_url(url) {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        Self::into_upstream(response).await
    }
}
