//! Pattern and reference tables.
//!
//! Both tables are data, not code: the built-in set lives in
//! `data/sections.json` and a replacement can be loaded from any path.
//! Tables are compiled and validated once, when a parser is built.

pub mod patterns;
pub mod references;

use std::collections::BTreeMap;
use std::path::Path;

use resumesect_core::{Category, Error, Language, ParserConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub use patterns::CategoryPatterns;
pub use references::ReferenceStore;

const BUILTIN_TABLES: &str = include_str!("../data/sections.json");

/// Keyword pattern for one category, as written in the table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Regex fragments, joined into one alternation.
    pub alternatives: Vec<String>,
    /// Require each alternative to stand as a whole word.
    #[serde(default)]
    pub whole_words: bool,
}

/// Raw, uncompiled table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSource {
    pub patterns: BTreeMap<Category, PatternSpec>,
    pub references: BTreeMap<Category, BTreeMap<Language, String>>,
}

/// Compiled keyword patterns plus reference descriptions.
#[derive(Debug, Clone)]
pub struct SectionTables {
    patterns: CategoryPatterns,
    references: ReferenceStore,
}

impl SectionTables {
    /// Tables shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TABLES)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let source: TableSource = serde_json::from_str(json)?;
        Self::from_source(source)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let tables = Self::from_json(&raw)?;
        info!(
            "Loaded section tables from {} ({} categories)",
            path.display(),
            tables.patterns.len()
        );
        Ok(tables)
    }

    /// The configured table file, or the built-in tables.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        match &config.tables_path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Compile patterns and check that every category with a pattern can
    /// always resolve a reference description.
    pub fn from_source(source: TableSource) -> Result<Self> {
        let patterns = CategoryPatterns::compile(&source.patterns)?;
        let references = ReferenceStore::new(source.references);

        for category in patterns.categories() {
            if !references.has(category, &Language::FALLBACK) {
                return Err(Error::MissingReference {
                    category: category.to_string(),
                    language: Language::FALLBACK.to_string(),
                });
            }
        }

        Ok(Self {
            patterns,
            references,
        })
    }

    pub fn patterns(&self) -> &CategoryPatterns {
        &self.patterns
    }

    pub fn references(&self) -> &ReferenceStore {
        &self.references
    }

    /// Categories that have a keyword pattern, in category order.
    pub fn categories(&self) -> Vec<Category> {
        self.patterns.categories().collect()
    }
}
