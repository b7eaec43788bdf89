//! Parser configuration: defaults, JSON file, environment overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Default number of lines after the anchor in the initial window.
pub const DEFAULT_WINDOW_SIZE: usize = 3;
/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "distilbert-base-uncased";
/// Default prefix length handed to the language detector.
pub const DEFAULT_LANGUAGE_SAMPLE_CHARS: usize = 1000;

const MAX_WINDOW_SIZE: usize = 1000;

/// Which document lines the boundary expander tries as candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    /// Every document line from the first one, regardless of where the span sits.
    /// A line that precedes the window can be appended; the span's indices are then
    /// no longer contiguous.
    WholeDocument,
    /// Only lines after the span's last line, in order.
    #[default]
    FollowingLines,
}

impl std::str::FromStr for CandidatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "whole_document" => Ok(Self::WholeDocument),
            "following_lines" => Ok(Self::FollowingLines),
            other => Err(Error::Config(format!("unknown candidate policy: {}", other))),
        }
    }
}

/// Configuration for one `SectionParser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines after the anchor in the initial window (*k*).
    pub window_size: usize,
    pub candidate_policy: CandidatePolicy,
    /// Hard cap on candidate evaluations per anchor.
    pub max_candidates: Option<usize>,
    /// Wall-clock budget per anchor, in milliseconds.
    pub deadline_ms: Option<u64>,
    /// Embedding model identifier handed to the oracle factory.
    pub embedding_model: String,
    /// Directory holding `model.onnx` and `tokenizer.json`.
    pub model_dir: Option<PathBuf>,
    /// Prefix of the document (in chars) used for language detection.
    pub language_sample_chars: usize,
    /// JSON file replacing the built-in pattern and reference tables.
    pub tables_path: Option<PathBuf>,
    /// Strip punctuation and special characters before parsing.
    pub clean_input: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            candidate_policy: CandidatePolicy::default(),
            max_candidates: None,
            deadline_ms: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            model_dir: None,
            language_sample_chars: DEFAULT_LANGUAGE_SAMPLE_CHARS,
            tables_path: None,
            clean_input: false,
        }
    }
}

impl ParserConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: ParserConfig = serde_json::from_str(&raw)?;
        info!("Loaded parser config from {}", path.display());
        Ok(config)
    }

    /// Defaults (or the given file) with `RESUMESECT_*` environment overrides applied.
    pub fn from_env(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("RESUMESECT_WINDOW_SIZE") {
            self.window_size = parse_number("RESUMESECT_WINDOW_SIZE", &v)?;
        }
        if let Some(v) = lookup("RESUMESECT_CANDIDATE_POLICY") {
            self.candidate_policy = v.parse()?;
        }
        if let Some(v) = lookup("RESUMESECT_MAX_CANDIDATES") {
            self.max_candidates = Some(parse_number("RESUMESECT_MAX_CANDIDATES", &v)?);
        }
        if let Some(v) = lookup("RESUMESECT_DEADLINE_MS") {
            self.deadline_ms = Some(parse_number::<u64>("RESUMESECT_DEADLINE_MS", &v)?);
        }
        if let Some(v) = lookup("RESUMESECT_EMBEDDING_MODEL") {
            self.embedding_model = v;
        }
        if let Some(v) = lookup("RESUMESECT_MODEL_DIR") {
            self.model_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("RESUMESECT_TABLES") {
            self.tables_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("RESUMESECT_CLEAN_INPUT") {
            self.clean_input = matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Reject settings that cannot produce a meaningful parse.
    pub fn validate(&self) -> Result<()> {
        if self.window_size > MAX_WINDOW_SIZE {
            return Err(Error::Config(format!(
                "window_size {} exceeds {}",
                self.window_size, MAX_WINDOW_SIZE
            )));
        }
        if self.max_candidates == Some(0) {
            return Err(Error::Config("max_candidates must be at least 1".into()));
        }
        if self.language_sample_chars == 0 {
            return Err(Error::Config("language_sample_chars must be at least 1".into()));
        }
        if self.embedding_model.trim().is_empty() {
            return Err(Error::Config("embedding_model must not be empty".into()));
        }
        Ok(())
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} is not a number: {}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.candidate_policy, CandidatePolicy::FollowingLines);
        assert_eq!(config.embedding_model, "distilbert-base-uncased");
        assert!(config.deadline().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window_size": 1, "candidate_policy": "whole_document"}}"#).unwrap();

        let config = ParserConfig::load(file.path()).unwrap();
        assert_eq!(config.window_size, 1);
        assert_eq!(config.candidate_policy, CandidatePolicy::WholeDocument);
        assert_eq!(config.language_sample_chars, DEFAULT_LANGUAGE_SAMPLE_CHARS);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("RESUMESECT_WINDOW_SIZE", "5"),
            ("RESUMESECT_CANDIDATE_POLICY", "whole-document"),
            ("RESUMESECT_MAX_CANDIDATES", "40"),
            ("RESUMESECT_DEADLINE_MS", "250"),
            ("RESUMESECT_CLEAN_INPUT", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = ParserConfig::default();
        config
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.window_size, 5);
        assert_eq!(config.candidate_policy, CandidatePolicy::WholeDocument);
        assert_eq!(config.max_candidates, Some(40));
        assert_eq!(config.deadline(), Some(Duration::from_millis(250)));
        assert!(config.clean_input);
    }

    #[test]
    fn test_env_bad_number() {
        let mut config = ParserConfig::default();
        let err = config
            .apply_env(|k| (k == "RESUMESECT_WINDOW_SIZE").then(|| "three".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let config = ParserConfig {
            max_candidates: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
