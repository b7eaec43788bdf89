//! Language detection.
//!
//! The detector is an external collaborator behind `LanguageDetector`.
//! `StopwordDetector` is the built-in heuristic: it counts function words
//! per language and picks the language with the most hits.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use resumesect_core::{Error, Language, Result};
use tracing::{debug, warn};

/// Text → language oracle. Implementations may fail.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<Language>;
}

/// Function words per ISO 639-1 code. Order decides ties.
static STOPWORDS: Lazy<Vec<(&'static str, HashSet<&'static str>)>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 6] = [
        ("en", &[
            "the", "and", "of", "to", "in", "for", "with", "on", "at", "as", "is", "was",
            "by", "from", "an", "my", "i", "have", "this", "that", "worked", "using",
        ]),
        ("fr", &[
            "le", "la", "les", "des", "du", "de", "et", "en", "un", "une", "aux",
            "pour", "avec", "dans", "sur", "par", "est", "je", "j", "d", "l", "au", "sein",
        ]),
        ("es", &[
            "el", "los", "las", "del", "y", "con", "para", "una", "por", "en", "que", "como",
        ]),
        ("de", &[
            "der", "die", "das", "und", "mit", "für", "von", "ich", "ein", "eine", "bei", "im",
        ]),
        ("it", &[
            "il", "lo", "gli", "della", "delle", "e", "con", "per", "una", "nel", "presso",
        ]),
        ("pt", &[
            "o", "os", "da", "das", "do", "dos", "e", "com", "para", "uma", "em", "na", "no",
        ]),
    ];
    table
        .iter()
        .map(|(code, words)| (*code, words.iter().copied().collect()))
        .collect()
});

/// Heuristic detector based on function-word frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopwordDetector;

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Result<Language> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err(Error::Detection("no words to classify".into()));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            for (code, words) in STOPWORDS.iter() {
                if words.contains(token) {
                    *counts.entry(*code).or_insert(0) += 1;
                }
            }
        }

        // First language in table order wins ties.
        let best = STOPWORDS
            .iter()
            .map(|(code, _)| (*code, counts.get(code).copied().unwrap_or(0)))
            .fold(None::<(&str, usize)>, |best, (code, n)| match best {
                Some((_, m)) if m >= n => best,
                _ if n > 0 => Some((code, n)),
                _ => best,
            });

        match best {
            Some((code, hits)) => {
                debug!("Detected language {} ({} stop words)", code, hits);
                Ok(Language::from_code(code))
            }
            None => Err(Error::Detection("no stop words recognised".into())),
        }
    }
}

/// Detect the language of `text` from its lower-cased first `sample_chars`
/// characters. Any detector failure yields `Language::Unknown`.
pub fn detect_language(detector: &dyn LanguageDetector, text: &str, sample_chars: usize) -> Language {
    let sample: String = text.chars().take(sample_chars).collect::<String>().to_lowercase();
    match detector.detect(&sample) {
        Ok(lang) => lang,
        Err(e) => {
            warn!("Language detection failed, continuing as unknown: {}", e);
            Language::Unknown
        }
    }
}
