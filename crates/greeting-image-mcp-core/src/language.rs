//! Supported greeting languages and their fixed templates.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Languages the greeting tool can answer in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Korean
    Ko,
    /// Japanese
    Ja,
}

impl Language {
    /// Every supported language, in the order they are advertised.
    pub const ALL: [Language; 3] = [Language::En, Language::Ko, Language::Ja];

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
            Language::Ja => "ja",
        }
    }

    /// Name of the language written in that language.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ko => "한국어",
            Language::Ja => "日本語",
        }
    }

    /// Emoji appended to the greeting.
    pub fn emoji(self) -> &'static str {
        match self {
            Language::En => "👋",
            Language::Ko => "😊",
            Language::Ja => "🙏",
        }
    }

    /// Short label recorded in the greeting's annotation metadata.
    pub fn description(self) -> &'static str {
        match self {
            Language::En => "English greeting",
            Language::Ko => "한국어 인사",
            Language::Ja => "日本語の挨拶",
        }
    }

    /// Greeting template with a `{name}` placeholder.
    pub fn template(self) -> &'static str {
        match self {
            Language::En => "Hello, {name}! Nice to meet you! 👋",
            Language::Ko => "안녕하세요, {name}님! 만나서 반갑습니다! 😊",
            Language::Ja => "こんにちは、{name}さん！お会いできて嬉しいです！🙏",
        }
    }

    /// Render the greeting for `name`. The name is inserted verbatim.
    pub fn greet(self, name: &str) -> String {
        match self {
            Language::En => format!("Hello, {name}! Nice to meet you! 👋"),
            Language::Ko => format!("안녕하세요, {name}님! 만나서 반갑습니다! 😊"),
            Language::Ja => format!("こんにちは、{name}さん！お会いできて嬉しいです！🙏"),
        }
    }

    /// Prefix for image-generation failures reported to the user.
    pub fn image_error_prefix(self) -> &'static str {
        match self {
            Language::En => "An error occurred while generating the image",
            Language::Ko => "이미지 생성 중 오류가 발생했습니다",
            Language::Ja => "画像の生成中にエラーが発生しました",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_greet_english() {
        assert_eq!(
            Language::En.greet("Alice"),
            "Hello, Alice! Nice to meet you! 👋"
        );
    }

    #[test]
    fn test_greet_korean() {
        assert_eq!(
            Language::Ko.greet("철수"),
            "안녕하세요, 철수님! 만나서 반갑습니다! 😊"
        );
    }

    #[test]
    fn test_greet_japanese() {
        assert_eq!(
            Language::Ja.greet("田中"),
            "こんにちは、田中さん！お会いできて嬉しいです！🙏"
        );
    }

    #[test]
    fn test_template_matches_greet() {
        for lang in Language::ALL {
            assert_eq!(lang.template().replace("{name}", "Bob"), lang.greet("Bob"));
            assert!(lang.greet("Bob").ends_with(lang.emoji()));
        }
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::Ko).unwrap(), "\"ko\"");
        let lang: Language = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(lang, Language::Ja);
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_name_is_interpolated_verbatim(name in "\\PC{1,40}") {
            for lang in Language::ALL {
                let text = lang.greet(&name);
                prop_assert_eq!(text, lang.template().replacen("{name}", &name, 1));
            }
        }
    }
}
