//! Tool output model: content blocks plus optional annotations.
//!
//! These types are protocol-agnostic. The server crate converts a
//! [`ToolOutput`] into the SDK's call result at the edge.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MIME type of every generated image.
pub const IMAGE_PNG: &str = "image/png";

/// Priority used for greetings and for error reports.
pub const PRIORITY_HIGH: f32 = 1.0;

/// Priority used for successfully generated images.
pub const PRIORITY_IMAGE: f32 = 0.9;

/// A single block of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Plain text
    Text {
        /// The text itself
        text: String,
    },
    /// Base64-encoded image
    Image {
        /// Base64 payload (standard alphabet, padded)
        data: String,
        /// MIME type of the decoded payload
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create an image block.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Text of a text block, `None` for images.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Image { .. } => None,
        }
    }
}

/// Intended reader of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// The human user
    User,
    /// The calling model
    Assistant,
}

/// Side-channel information attached to a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    /// Who the result is meant for
    pub audience: Vec<Audience>,

    /// Importance between 0.0 and 1.0
    pub priority: f32,

    /// Free-form key/value map
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Annotations {
    /// Annotations addressed to the user with the given priority.
    pub fn for_user(priority: f32) -> Self {
        Self {
            audience: vec![Audience::User],
            priority,
            metadata: Map::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Ordered content blocks
    pub content: Vec<ContentBlock>,

    /// Optional annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl ToolOutput {
    /// Output consisting of one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            annotations: None,
        }
    }

    /// Output consisting of one image block.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::image(data, mime_type)],
            annotations: None,
        }
    }

    /// Attach annotations.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// Format a time as ISO-8601 UTC with millisecond precision, e.g.
/// `2024-05-01T09:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as an ISO-8601 UTC string.
pub fn timestamp_now() -> String {
    iso_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_text_block_wire_shape() {
        let block = ContentBlock::text("hi");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"type": "text", "text": "hi"})
        );
    }

    #[test]
    fn test_image_block_wire_shape() {
        let block = ContentBlock::image("AAAA", IMAGE_PNG);
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"type": "image", "data": "AAAA", "mimeType": "image/png"})
        );
    }

    #[test]
    fn test_annotations_metadata() {
        let annotations = Annotations::for_user(PRIORITY_HIGH)
            .with_metadata("language", "en")
            .with_metadata("count", 2);
        let value = serde_json::to_value(&annotations).unwrap();
        assert_eq!(value["audience"], json!(["user"]));
        assert_eq!(value["priority"], json!(1.0));
        assert_eq!(value["metadata"]["language"], "en");
        assert_eq!(value["metadata"]["count"], 2);
    }

    #[test]
    fn test_empty_metadata_is_omitted() {
        let value = serde_json::to_value(Annotations::for_user(PRIORITY_HIGH)).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_iso_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T09:30:00.000Z");
    }

    #[test]
    fn test_timestamp_now_parses() {
        let ts = timestamp_now();
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
        assert!(ts.ends_with('Z'));
    }
}
