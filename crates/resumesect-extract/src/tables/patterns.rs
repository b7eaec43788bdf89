//! Category pattern table: one case-insensitive regex per category.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use resumesect_core::{Category, Error, Result};

use super::PatternSpec;

/// Compiled keyword regexes keyed by category.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatterns {
    table: BTreeMap<Category, Regex>,
}

impl CategoryPatterns {
    /// Compile every spec. A malformed pattern is a configuration error.
    pub fn compile(specs: &BTreeMap<Category, PatternSpec>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for (&category, spec) in specs {
            table.insert(category, build_regex(category, spec)?);
        }
        Ok(Self { table })
    }

    /// Whether the category's pattern matches anywhere in `line`.
    pub fn is_match(&self, line: &str, category: Category) -> bool {
        self.table
            .get(&category)
            .map(|re| re.is_match(line))
            .unwrap_or(false)
    }

    /// Every non-overlapping match of the category's pattern in `line`.
    pub fn find_all<'t>(&self, line: &'t str, category: Category) -> Vec<&'t str> {
        match self.table.get(&category) {
            Some(re) => re.find_iter(line).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.table.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn build_regex(category: Category, spec: &PatternSpec) -> Result<Regex> {
    let alternatives: Vec<&str> = spec
        .alternatives
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if alternatives.is_empty() {
        return Err(Error::Pattern {
            name: category.to_string(),
            message: "no alternatives".into(),
        });
    }

    let joined = alternatives.join("|");
    // Half boundaries so tokens ending in a symbol (c++, c#) still match.
    let pattern = if spec.whole_words {
        format!(r"\b{{start-half}}(?:{})\b{{end-half}}", joined)
    } else {
        format!("(?:{})", joined)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::Pattern {
            name: category.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::SectionTables;

    fn builtin() -> CategoryPatterns {
        SectionTables::builtin().unwrap().patterns().clone()
    }

    #[test]
    fn test_header_match_anywhere_case_insensitive() {
        let patterns = builtin();
        assert!(patterns.is_match("PROFESSIONAL EXPERIENCE", Category::Experience));
        assert!(patterns.is_match("  Work Experience:", Category::Experience));
        assert!(patterns.is_match("Expériences professionnelles", Category::Experience));
        assert!(patterns.is_match("Parcours académique", Category::Education));
        assert!(!patterns.is_match("Hobbies", Category::Experience));
    }

    #[test]
    fn test_skill_tokens_are_whole_words() {
        let patterns = builtin();
        assert_eq!(
            patterns.find_all("Python, C++ and C# on Linux", Category::Skills),
            vec!["Python", "C++", "C#", "Linux"]
        );
        // "pythonic" and "gopher" contain tokens but not as words
        assert!(patterns.find_all("pythonic gopher", Category::Skills).is_empty());
    }

    #[test]
    fn test_multiword_skills() {
        let patterns = builtin();
        let found = patterns.find_all("Machine Learning, React Native, mac os", Category::Skills);
        assert!(found.contains(&"Machine Learning"));
        assert!(found.contains(&"React Native"));
        assert!(found.contains(&"mac os"));
    }

    #[test]
    fn test_unknown_category_never_matches() {
        let patterns = CategoryPatterns::default();
        assert!(!patterns.is_match("experience", Category::Experience));
        assert!(patterns.find_all("python", Category::Skills).is_empty());
    }

    #[test]
    fn test_empty_alternatives_rejected() {
        let mut specs = BTreeMap::new();
        specs.insert(
            Category::Education,
            PatternSpec {
                alternatives: vec!["  ".into()],
                whole_words: false,
            },
        );
        assert!(matches!(
            CategoryPatterns::compile(&specs),
            Err(Error::Pattern { .. })
        ));
    }
}
