//! resumesect extract — section discovery and skill extraction for résumé text.
//!
//! Sections are found in two steps: a category keyword marks where a section
//! starts, then greedy boundary expansion decides how far it extends by
//! comparing embeddings of the growing span with a reference description.
//! Skills are pulled out independently with a keyword pattern.

pub mod document;
pub mod language;
pub mod parser;
pub mod sections;
pub mod skills;
pub mod tables;

pub use document::{clean_text, Document};
pub use language::{detect_language, LanguageDetector, StopwordDetector};
pub use parser::{ParsedResume, SectionParser};
pub use sections::{
    locate, Anchor, BoundaryExpander, ExpanderSettings, ExtractedSection, SectionSpan, StopReason,
};
pub use skills::extract_skills;
pub use tables::{CategoryPatterns, ReferenceStore, SectionTables};

use resumesect_core::{ParserConfig, Result};
use resumesect_infer::EmbedderBackend;

/// Parse `text` with the default configuration and built-in tables.
pub fn parse_resume(text: &str, embedder: &dyn EmbedderBackend) -> Result<ParsedResume> {
    SectionParser::new(ParserConfig::default())?.parse(text, embedder)
}
