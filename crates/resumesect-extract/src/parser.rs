//! End-to-end parse: language → anchors → expansion per category, plus skills.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use resumesect_core::{Category, Language, ParserConfig, Result};
use resumesect_infer::{EmbedderBackend, MemoEmbedder};
use serde::Serialize;
use tracing::{debug, info};

use crate::document::{clean_text, Document};
use crate::language::{detect_language, LanguageDetector, StopwordDetector};
use crate::sections::{locate, BoundaryExpander, ExpanderSettings, ExtractedSection};
use crate::skills::extract_skills;
use crate::tables::SectionTables;

/// Structured result of one parse.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub language: Language,
    /// Every category of the tables, in category order; empty when no anchor matched.
    pub sections: BTreeMap<Category, Vec<ExtractedSection>>,
    pub skills: BTreeSet<String>,
}

/// Stateless section parser. Holds only immutable configuration.
pub struct SectionParser {
    config: ParserConfig,
    tables: Arc<SectionTables>,
    detector: Box<dyn LanguageDetector>,
}

impl SectionParser {
    /// Build a parser from configuration, loading the configured tables.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let tables = SectionTables::from_config(&config)?;
        Self::with_tables(config, Arc::new(tables))
    }

    pub fn with_tables(config: ParserConfig, tables: Arc<SectionTables>) -> Result<Self> {
        config.validate()?;
        info!(
            "Section parser ready: categories={:?}, window={}, policy={:?}",
            tables.categories(),
            config.window_size,
            config.candidate_policy
        );
        Ok(Self {
            config,
            tables,
            detector: Box::new(StopwordDetector),
        })
    }

    /// Replace the built-in language detector.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn tables(&self) -> &SectionTables {
        &self.tables
    }

    /// Parse one document.
    ///
    /// Oracle and detection failures degrade the result; only a missing
    /// reference description is returned as an error.
    pub fn parse(&self, text: &str, embedder: &dyn EmbedderBackend) -> Result<ParsedResume> {
        let cleaned;
        let text = if self.config.clean_input {
            cleaned = clean_text(text);
            cleaned.as_str()
        } else {
            text
        };

        let document = Document::new(text);
        let language = detect_language(self.detector.as_ref(), text, self.config.language_sample_chars);
        debug!("Parsing {} lines, language={}", document.len(), language);

        let memo = MemoEmbedder::new(embedder);
        let expander = BoundaryExpander::new(&memo, ExpanderSettings::from(&self.config));

        let mut sections = BTreeMap::new();
        for category in self.tables.categories() {
            let spans = locate(&document, self.tables.patterns(), category, self.config.window_size);
            let mut extracted = Vec::with_capacity(spans.len());
            if !spans.is_empty() {
                let reference = self.tables.references().lookup(category, &language)?;
                for span in spans {
                    extracted.push(expander.expand(&document, span, reference));
                }
            }
            debug!("{}: {} section(s)", category, extracted.len());
            sections.insert(category, extracted);
        }

        let skills = extract_skills(&document, self.tables.patterns());

        let (hits, misses) = memo.stats();
        debug!("Embedding calls: {} model, {} memoised", misses, hits);

        Ok(ParsedResume {
            language,
            sections,
            skills,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumesect_core::{Error, Language};
    use resumesect_infer::{HashingEmbedder, NoopEmbedder};

    const RESUME: &str = "Jane Doe\n\
        Professional Experience\n\
        Backend engineer at Acme, building APIs with Python and Docker\n\
        Maintained the payments service for the team\n\
        Education\n\
        BSc in Computer Science from the University of Lyon\n\
        Hobbies\n\
        Chess and hiking";

    #[test]
    fn test_parse_shape() {
        let parser = SectionParser::new(ParserConfig::default()).unwrap();
        let result = parser.parse(RESUME, &HashingEmbedder::default()).unwrap();

        assert_eq!(result.language, Language::En);
        assert_eq!(result.sections.len(), 3);
        assert_eq!(result.sections[&Category::Experience].len(), 1);
        assert_eq!(result.sections[&Category::Experience][0].anchor.line_index, 1);
        assert_eq!(result.sections[&Category::Education][0].anchor.line_index, 4);
        assert!(result.skills.contains("python"));
        assert!(result.skills.contains("docker"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = SectionParser::new(ParserConfig::default()).unwrap();
        let embedder = HashingEmbedder::default();
        let a = serde_json::to_string(&parser.parse(RESUME, &embedder).unwrap()).unwrap();
        let b = serde_json::to_string(&parser.parse(RESUME, &embedder).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_oracle_down_still_returns_windows() {
        let parser = SectionParser::new(ParserConfig::default()).unwrap();
        let result = parser.parse(RESUME, &NoopEmbedder::new(8)).unwrap();

        let experience = &result.sections[&Category::Experience][0];
        assert_eq!(experience.line_indices, vec![1, 2, 3, 4]);
        assert_eq!(experience.score, None);
        assert!(!result.skills.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let parser = SectionParser::new(ParserConfig::default()).unwrap();
        let result = parser.parse("", &HashingEmbedder::default()).unwrap();
        assert_eq!(result.language, Language::Unknown);
        assert!(result.sections.values().all(|s| s.is_empty()));
        assert!(result.skills.is_empty());
    }

    #[test]
    fn test_clean_input() {
        let config = ParserConfig {
            clean_input: true,
            ..Default::default()
        };
        let parser = SectionParser::new(config).unwrap();
        let result = parser
            .parse("Experience:\nAcme — engineer!", &HashingEmbedder::default())
            .unwrap();
        assert_eq!(result.sections[&Category::Experience][0].anchor.text, "Experience");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ParserConfig {
            language_sample_chars: 0,
            ..Default::default()
        };
        assert!(matches!(SectionParser::new(config), Err(Error::Config(_))));
    }
}
