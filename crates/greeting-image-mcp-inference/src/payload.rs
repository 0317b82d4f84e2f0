//! Decoding of upstream responses into image bytes.
//!
//! The inference API can answer with several shapes. Each shape has a
//! matcher; matchers run in a fixed priority order and the first hit wins:
//!
//! 1. `blob` - an `image/*` body
//! 2. `string` - base64 text (plain text, a JSON string, or a `data:` URL)
//! 3. `buffer` - an untyped or `application/octet-stream` body
//! 4. `blob-like` - JSON pointing at a hosted image that must be fetched
//!
//! Anything else is [`InferenceError::UnexpectedFormat`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tracing::debug;

use crate::backend::{TextToImageBackend, UpstreamResponse};
use crate::error::{InferenceError, Result};

/// A decoded upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    /// Binary image body
    Blob(Vec<u8>),
    /// Base64 text, possibly wrapped in a `data:` URL
    Text(String),
    /// Raw bytes without an image content type
    Buffer(Vec<u8>),
    /// URL of a hosted image, resolved lazily
    BlobLike(String),
}

impl ImagePayload {
    /// Shape name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ImagePayload::Blob(_) => "blob",
            ImagePayload::Text(_) => "string",
            ImagePayload::Buffer(_) => "buffer",
            ImagePayload::BlobLike(_) => "blob-like",
        }
    }

    /// Resolve the payload to raw image bytes.
    ///
    /// Blob-like payloads are fetched through `backend`; the fetched body must
    /// itself decode to a blob or a buffer.
    pub async fn into_bytes(
        self,
        backend: &dyn TextToImageBackend,
        token: &str,
    ) -> Result<Vec<u8>> {
        match self {
            ImagePayload::Blob(bytes) | ImagePayload::Buffer(bytes) => Ok(bytes),
            ImagePayload::Text(text) => decode_base64(&text),
            ImagePayload::BlobLike(url) => {
                debug!("Fetching hosted image: {}", url);
                let fetched = backend.fetch(token, &url).await?;
                match decode(&fetched)? {
                    ImagePayload::Blob(bytes) | ImagePayload::Buffer(bytes) => Ok(bytes),
                    other => Err(InferenceError::UnexpectedFormat(format!(
                        "{} behind {}",
                        other.kind(),
                        url
                    ))),
                }
            }
        }
    }
}

/// What the matchers look at.
struct ResponseView<'a> {
    media_type: Option<String>,
    body: &'a [u8],
    json: Option<Value>,
}

impl<'a> ResponseView<'a> {
    fn new(response: &'a UpstreamResponse) -> Self {
        let media_type = response.media_type();
        let is_json = media_type
            .as_deref()
            .is_some_and(|mt| mt == "application/json" || mt.ends_with("+json"));
        let json = if is_json {
            serde_json::from_slice(&response.body).ok()
        } else {
            None
        };

        Self {
            media_type,
            body: &response.body,
            json,
        }
    }

    fn first_image_url(&self) -> Option<&str> {
        let json = self.json.as_ref()?;
        json.pointer("/images/0/url")
            .or_else(|| json.pointer("/image/url"))
            .or_else(|| json.get("url"))
            .and_then(Value::as_str)
    }

    /// Runtime type reported when no matcher applies.
    fn describe(&self) -> String {
        match &self.json {
            Some(Value::Null) => "null".to_string(),
            Some(Value::Bool(_)) => "boolean".to_string(),
            Some(Value::Number(_)) => "number".to_string(),
            Some(Value::String(_)) => "string".to_string(),
            Some(Value::Array(_)) => "array".to_string(),
            Some(Value::Object(_)) => "object".to_string(),
            None => self
                .media_type
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

type Matcher = fn(&ResponseView<'_>) -> Option<ImagePayload>;

/// Shape matchers in priority order.
const MATCHERS: &[(&str, Matcher)] = &[
    ("blob", match_blob),
    ("string", match_string),
    ("buffer", match_buffer),
    ("blob-like", match_blob_like),
];

fn match_blob(view: &ResponseView<'_>) -> Option<ImagePayload> {
    view
        .media_type
        .as_deref()
        .filter(|mt| mt.starts_with("image/"))
        .map(|_| ImagePayload::Blob(view.body.to_vec()))
}

fn match_string(view: &ResponseView<'_>) -> Option<ImagePayload> {
    if view
        .media_type
        .as_deref()
        .is_some_and(|mt| mt.starts_with("text/"))
    {
        return std::str::from_utf8(view.body)
            .ok()
            .map(|text| ImagePayload::Text(text.trim().to_string()));
    }

    if let Some(Value::String(text)) = &view.json {
        return Some(ImagePayload::Text(text.clone()));
    }

    view
        .first_image_url()
        .filter(|url| url.starts_with("data:"))
        .map(|url| ImagePayload::Text(url.to_string()))
}

fn match_buffer(view: &ResponseView<'_>) -> Option<ImagePayload> {
    match view.media_type.as_deref() {
        None | Some("application/octet-stream") => Some(ImagePayload::Buffer(view.body.to_vec())),
        Some(_) => None,
    }
}

fn match_blob_like(view: &ResponseView<'_>) -> Option<ImagePayload> {
    view
        .first_image_url()
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
        .map(|url| ImagePayload::BlobLike(url.to_string()))
}

/// Decode an upstream response into an [`ImagePayload`].
pub fn decode(response: &UpstreamResponse) -> Result<ImagePayload> {
    let view = ResponseView::new(response);

    for (shape, matcher) in MATCHERS {
        if let Some(payload) = matcher(&view) {
            debug!("Upstream response matched shape '{}'", shape);
            return Ok(payload);
        }
    }

    Err(InferenceError::UnexpectedFormat(view.describe()))
}

/// Decode base64 text, accepting a `data:<mime>;base64,` prefix and embedded whitespace.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let payload = match text.strip_prefix("data:") {
        Some(rest) => rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| InferenceError::UnexpectedFormat("data URL without payload".into()))?,
        None => text,
    };

    let cleaned: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    Ok(STANDARD.decode(cleaned)?)
}

/// Encode bytes with the standard padded base64 alphabet.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
