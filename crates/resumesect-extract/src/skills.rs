//! Skill keyword extraction over the whole document.

use std::collections::BTreeSet;

use resumesect_core::Category;

use crate::document::Document;
use crate::tables::CategoryPatterns;

/// Every skill token found on any line, lower-cased and de-duplicated.
///
/// Runs line by line, independent of anchors, embeddings and language.
pub fn extract_skills(document: &Document, patterns: &CategoryPatterns) -> BTreeSet<String> {
    document
        .lines()
        .iter()
        .flat_map(|line| patterns.find_all(line, Category::Skills))
        .map(normalize_skill)
        .collect()
}

/// Lower-case and collapse inner whitespace ("Machine  Learning" → "machine learning").
pub fn normalize_skill(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
