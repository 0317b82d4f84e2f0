//! MCP Tool Types
//!
//! Parameter types for the registered tools and the conversion from the
//! protocol-agnostic [`ToolOutput`] into an rmcp call result.

use rmcp::model::{CallToolResult, Content, Role};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use greeting_image_mcp_core::{Audience, ContentBlock, Language, NonEmptyString, ToolOutput};

// =============================================================================
// Greeting Tool
// =============================================================================

/// Parameters for greeting
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GreetingParams {
    /// 인사할 사람의 이름
    pub name: NonEmptyString,

    /// 인사 언어 (en: 영어, ko: 한국어, ja: 일본어, 기본값: en)
    #[serde(default)]
    pub language: Language,
}

// =============================================================================
// Image Generation Tool
// =============================================================================

/// Parameters for generate_image
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateImageParams {
    /// 이미지 생성을 위한 프롬프트 설명
    pub prompt: NonEmptyString,
}

// =============================================================================
// Result Conversion
// =============================================================================

fn role(audience: Audience) -> Role {
    match audience {
        Audience::User => Role::User,
        Audience::Assistant => Role::Assistant,
    }
}

/// Convert tool output into a successful call result.
///
/// Audience and priority are applied to every content block. The full
/// annotations, metadata included, are carried in `structuredContent`.
pub fn into_call_result(output: ToolOutput) -> CallToolResult {
    let ToolOutput {
        content,
        annotations,
    } = output;

    let content = content
        .into_iter()
        .map(|block| {
            let content = match block {
                ContentBlock::Text { text } => Content::text(text),
                ContentBlock::Image { data, mime_type } => Content::image(data, mime_type),
            };
            match &annotations {
                Some(annotations) => content
                    .with_audience(annotations.audience.iter().copied().map(role).collect())
                    .with_priority(annotations.priority),
                None => content,
            }
        })
        .collect();

    let mut result = CallToolResult::success(content);
    if let Some(annotations) = annotations {
        result.structured_content = Some(json!({ "annotations": annotations }));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeting_image_mcp_core::{Annotations, PRIORITY_HIGH, PRIORITY_IMAGE};
    use serde_json::Value;

    #[test]
    fn test_greeting_params_default_language() {
        let params: GreetingParams = serde_json::from_value(json!({"name": "Alice"})).unwrap();
        assert_eq!(params.language, Language::En);
        assert_eq!(params.name.as_str(), "Alice");
    }

    #[test]
    fn test_greeting_params_reject_unknown_language() {
        let result: Result<GreetingParams, _> =
            serde_json::from_value(json!({"name": "Alice", "language": "fr"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_greeting_params_reject_empty_or_missing_name() {
        assert!(serde_json::from_value::<GreetingParams>(json!({"name": ""})).is_err());
        assert!(serde_json::from_value::<GreetingParams>(json!({"language": "ko"})).is_err());
    }

    #[test]
    fn test_generate_image_params_reject_empty_prompt() {
        assert!(serde_json::from_value::<GenerateImageParams>(json!({"prompt": ""})).is_err());
        let params: GenerateImageParams =
            serde_json::from_value(json!({"prompt": "a cat"})).unwrap();
        assert_eq!(params.prompt.as_str(), "a cat");
    }

    #[test]
    fn test_greeting_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(GreetingParams)).unwrap();
        let properties = &schema["properties"];

        assert_eq!(properties["name"]["type"], "string");
        assert_eq!(properties["name"]["minLength"], 1);
        assert_eq!(schema["required"], json!(["name"]));
    }

    #[test]
    fn test_text_output_conversion() {
        let output = ToolOutput::text("Hello").with_annotations(
            Annotations::for_user(PRIORITY_HIGH).with_metadata("language", "en"),
        );

        let value = serde_json::to_value(into_call_result(output)).unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Hello");
        assert_eq!(value["content"][0]["annotations"]["audience"], json!(["user"]));
        assert_eq!(value["content"][0]["annotations"]["priority"], 1.0);
        assert_eq!(
            value["structuredContent"]["annotations"]["metadata"]["language"],
            "en"
        );
        assert_ne!(value["isError"], Value::Bool(true));
    }

    #[test]
    fn test_image_output_conversion() {
        let output = ToolOutput::image("AAAA", "image/png")
            .with_annotations(Annotations::for_user(PRIORITY_IMAGE));

        let value = serde_json::to_value(into_call_result(output)).unwrap();
        assert_eq!(value["content"][0]["type"], "image");
        assert_eq!(value["content"][0]["data"], "AAAA");
        assert_eq!(value["content"][0]["mimeType"], "image/png");

        let priority = value["content"][0]["annotations"]["priority"].as_f64().unwrap();
        assert!((priority - f64::from(PRIORITY_IMAGE)).abs() < 1e-6);
    }

    #[test]
    fn test_unannotated_output_conversion() {
        let value = serde_json::to_value(into_call_result(ToolOutput::text("plain"))).unwrap();
        assert!(value["content"][0].get("annotations").is_none());
        assert!(value.get("structuredContent").is_none());
    }
}
