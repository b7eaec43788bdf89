//! Document language codes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language attached to a document for the duration of one parse.
///
/// Serialized as `en`, `fr`, `other(<code>)` or `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Language {
    En,
    Fr,
    Other(String),
    #[default]
    Unknown,
}

impl Language {
    /// Language whose reference descriptions are used when the detected one has none.
    pub const FALLBACK: Language = Language::En;

    /// Map a bare ISO 639-1 code onto a language.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "" | "unknown" => Self::Unknown,
            "en" => Self::En,
            "fr" => Self::Fr,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse the display form, accepting bare codes as well as `other(xx)`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.strip_prefix("other(").and_then(|r| r.strip_suffix(')')) {
            Some(inner) => Self::Other(inner.to_lowercase()),
            None => Self::from_code(s),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::Fr => write!(f, "fr"),
            Self::Other(code) => write!(f, "other({})", code),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_roundtrip() {
        for lang in [
            Language::En,
            Language::Fr,
            Language::Other("de".into()),
            Language::Unknown,
        ] {
            assert_eq!(Language::parse(&lang.to_string()), lang);
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("FR"), Language::Fr);
        assert_eq!(Language::from_code("es"), Language::Other("es".into()));
        assert_eq!(Language::from_code(""), Language::Unknown);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Language::Other("it".into())).unwrap();
        assert_eq!(json, "\"other(it)\"");
        let back: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(back, Language::En);
    }
}
