//! Reference descriptions: the text each category's sections should resemble.

use std::collections::BTreeMap;

use resumesect_core::{Category, Error, Language, Result};
use tracing::{debug, warn};

/// Constant lookup table keyed by (category, language).
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    table: BTreeMap<Category, BTreeMap<Language, String>>,
}

impl ReferenceStore {
    pub fn new(table: BTreeMap<Category, BTreeMap<Language, String>>) -> Self {
        Self { table }
    }

    pub fn has(&self, category: Category, language: &Language) -> bool {
        self.table
            .get(&category)
            .map(|by_lang| by_lang.contains_key(language))
            .unwrap_or(false)
    }

    /// Reference text for `category` in `language`, falling back to English.
    ///
    /// Fails only when neither exists, which is a setup defect.
    pub fn lookup(&self, category: Category, language: &Language) -> Result<&str> {
        let by_lang = self.table.get(&category);

        if let Some(text) = by_lang.and_then(|m| m.get(language)) {
            return Ok(text.as_str());
        }

        if let Some(text) = by_lang.and_then(|m| m.get(&Language::FALLBACK)) {
            if *language == Language::Unknown {
                debug!("No language detected; using {} reference for {}", Language::FALLBACK, category);
            } else {
                warn!(
                    "No {} reference for {}; falling back to {}",
                    language,
                    category,
                    Language::FALLBACK
                );
            }
            return Ok(text.as_str());
        }

        Err(Error::MissingReference {
            category: category.to_string(),
            language: language.to_string(),
        })
    }
}
