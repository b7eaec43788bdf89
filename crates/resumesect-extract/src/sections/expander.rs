//! Greedy boundary expansion.
//!
//! Starting from an anchor's initial window, candidate lines are appended one
//! at a time while the cosine similarity between the accumulated text and the
//! category's reference description does not decrease. The first decrease
//! ends the section. Ties are accepted, so neutral lines extend the span.
//!
//! Cost is one embedding call per evaluated candidate, plus one for the
//! reference and one for the initial window.

use std::time::{Duration, Instant};

use ndarray::Array1;
use resumesect_core::{CandidatePolicy, ParserConfig};
use resumesect_infer::{cosine_similarity, EmbedderBackend};
use serde::Serialize;
use tracing::{debug, warn};

use super::locator::{Anchor, SectionSpan};
use crate::document::Document;

/// Why an expansion stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The next candidate lowered similarity.
    Decrease,
    /// The oracle failed; treated as a decrease.
    OracleFailure,
    /// No candidates left.
    EndOfDocument,
    /// `max_candidates` evaluations used up.
    CandidateCap,
    /// Per-anchor deadline passed.
    Deadline,
    /// The initial window had no lines.
    EmptyWindow,
}

/// Final section for one anchor.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedSection {
    pub anchor: Anchor,
    /// Span lines in the order they were accepted.
    pub line_indices: Vec<usize>,
    /// Span lines joined with newlines.
    pub text: String,
    /// Similarity of the final span to the reference; `None` when undefined.
    pub score: Option<f32>,
    /// Candidate line whose evaluation ended the expansion.
    pub stopped_at: Option<usize>,
    pub candidates_evaluated: usize,
    pub stop_reason: StopReason,
}

/// Expansion knobs, taken from `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ExpanderSettings {
    pub policy: CandidatePolicy,
    pub max_candidates: Option<usize>,
    pub deadline: Option<Duration>,
}

impl From<&ParserConfig> for ExpanderSettings {
    fn from(config: &ParserConfig) -> Self {
        Self {
            policy: config.candidate_policy,
            max_candidates: config.max_candidates,
            deadline: config.deadline(),
        }
    }
}

/// Greedy hill-climb over candidate lines for one anchor at a time.
pub struct BoundaryExpander<'a> {
    embedder: &'a dyn EmbedderBackend,
    settings: ExpanderSettings,
}

impl<'a> BoundaryExpander<'a> {
    pub fn new(embedder: &'a dyn EmbedderBackend, settings: ExpanderSettings) -> Self {
        Self { embedder, settings }
    }

    fn embed(&self, text: &str) -> Option<Array1<f32>> {
        match self.embedder.embed(text) {
            Ok(result) => Some(result.embedding),
            Err(e) => {
                warn!("Embedding failed ({} chars): {}", text.len(), e);
                None
            }
        }
    }

    /// Grow `span` against `reference` and return the finished section.
    pub fn expand(&self, document: &Document, mut span: SectionSpan, reference: &str) -> ExtractedSection {
        if span.is_empty() {
            return finish(document, span, None, None, 0, StopReason::EmptyWindow);
        }

        let Some(base) = self.embed(reference) else {
            return finish(document, span, None, None, 0, StopReason::OracleFailure);
        };

        let mut current_text = document.join(span.lines(), " ");
        let mut current_score = match self.embed(&current_text) {
            Some(v) => cosine_similarity(&base, &v),
            None => return finish(document, span, None, None, 0, StopReason::OracleFailure),
        };

        let first_candidate = match self.settings.policy {
            CandidatePolicy::WholeDocument => 0,
            CandidatePolicy::FollowingLines => span.last().map_or(0, |l| l + 1),
        };

        let started = Instant::now();
        let mut evaluated = 0;
        let mut stopped_at = None;
        let mut reason = StopReason::EndOfDocument;

        for (index, line) in document.lines().iter().enumerate().skip(first_candidate) {
            if self.settings.max_candidates.is_some_and(|cap| evaluated >= cap) {
                warn!(
                    "Candidate cap reached for anchor at line {}",
                    span.anchor().line_index
                );
                reason = StopReason::CandidateCap;
                break;
            }
            if self.settings.deadline.is_some_and(|d| started.elapsed() >= d) {
                warn!("Deadline reached for anchor at line {}", span.anchor().line_index);
                reason = StopReason::Deadline;
                break;
            }

            let candidate_text = format!("{} {}", current_text, line);
            evaluated += 1;

            let Some(v) = self.embed(&candidate_text) else {
                stopped_at = Some(index);
                reason = StopReason::OracleFailure;
                break;
            };
            let candidate_score = cosine_similarity(&base, &v);

            if candidate_score >= current_score {
                span.push(index);
                current_text = candidate_text;
                current_score = candidate_score;
            } else {
                debug!(
                    "Anchor {}: line {} drops similarity {:.4} -> {:.4}, stopping",
                    span.anchor().line_index,
                    index,
                    current_score,
                    candidate_score
                );
                stopped_at = Some(index);
                reason = StopReason::Decrease;
                break;
            }
        }

        debug!(
            "Anchor {} expanded to {} lines (score {:.4}, {:?})",
            span.anchor().line_index,
            span.len(),
            current_score,
            reason
        );
        finish(document, span, Some(current_score), stopped_at, evaluated, reason)
    }
}

fn finish(
    document: &Document,
    span: SectionSpan,
    score: Option<f32>,
    stopped_at: Option<usize>,
    candidates_evaluated: usize,
    stop_reason: StopReason,
) -> ExtractedSection {
    let text = document.join(span.lines(), "\n");
    let (anchor, line_indices) = span.into_parts();
    ExtractedSection {
        anchor,
        line_indices,
        text,
        score,
        stopped_at,
        candidates_evaluated,
        stop_reason,
    }
}
