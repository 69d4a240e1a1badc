use serde::{Deserialize, Serialize};

/// Language the input is written in. `Auto` lets the provider detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceLang {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetLang {
    #[default]
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "en")]
    English,
}

impl SourceLang {
    pub const ALL: [SourceLang; 3] = [SourceLang::Auto, SourceLang::English, SourceLang::Japanese];

    pub fn code(self) -> &'static str {
        match self {
            SourceLang::Auto => "auto",
            SourceLang::English => "en",
            SourceLang::Japanese => "ja",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceLang::Auto => "Detect language",
            SourceLang::English => "English",
            SourceLang::Japanese => "Japanese",
        }
    }
}

impl TargetLang {
    pub const ALL: [TargetLang; 2] = [TargetLang::Japanese, TargetLang::English];

    pub fn code(self) -> &'static str {
        match self {
            TargetLang::Japanese => "ja",
            TargetLang::English => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetLang::Japanese => "Japanese",
            TargetLang::English => "English",
        }
    }
}

/// A finalized translation job, built when the input goes quiet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: SourceLang,
    pub target: TargetLang,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: SourceLang, target: TargetLang) -> Self {
        Self { text: text.into(), source, target }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_provider_wire_values() {
        let src: Vec<_> = SourceLang::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(src, ["auto", "en", "ja"]);
        let dst: Vec<_> = TargetLang::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(dst, ["ja", "en"]);
    }

    #[test]
    fn defaults_are_auto_to_japanese() {
        assert_eq!(SourceLang::default(), SourceLang::Auto);
        assert_eq!(TargetLang::default(), TargetLang::Japanese);
    }

    #[test]
    fn serde_uses_language_codes() {
        let json = serde_json::to_string(&SourceLang::English).unwrap();
        assert_eq!(json, "\"en\"");
        let back: TargetLang = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, TargetLang::English);
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert!(TranslationRequest::new("", SourceLang::Auto, TargetLang::Japanese).is_empty());
        assert!(!TranslationRequest::new(" ", SourceLang::Auto, TargetLang::Japanese).is_empty());
    }
}
