//! Section locator: keyword anchors and their initial windows.

use resumesect_core::Category;
use serde::Serialize;

use crate::document::Document;
use crate::tables::CategoryPatterns;

/// Line where a category keyword appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub line_index: usize,
    /// Matched line, trimmed.
    pub text: String,
}

/// An anchor plus the lines judged to belong to its section.
///
/// Lines are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    anchor: Anchor,
    lines: Vec<usize>,
}

impl SectionSpan {
    /// Anchor line plus the next `window_size` lines, clamped at document end.
    pub fn initial(anchor: Anchor, window_size: usize, doc_len: usize) -> Self {
        let start = anchor.line_index.min(doc_len);
        let end = start.saturating_add(window_size).saturating_add(1).min(doc_len);
        Self {
            anchor,
            lines: (start..end).collect(),
        }
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    pub fn last(&self) -> Option<usize> {
        self.lines.last().copied()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn push(&mut self, line: usize) {
        self.lines.push(line);
    }

    pub(crate) fn into_parts(self) -> (Anchor, Vec<usize>) {
        (self.anchor, self.lines)
    }
}

/// One span per line matching `category`, in document order.
///
/// Overlapping spans from adjacent matches are kept as they are.
pub fn locate(
    document: &Document,
    patterns: &CategoryPatterns,
    category: Category,
    window_size: usize,
) -> Vec<SectionSpan> {
    document
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| patterns.is_match(line, category))
        .map(|(i, line)| {
            let anchor = Anchor {
                line_index: i,
                text: line.trim().to_string(),
            };
            SectionSpan::initial(anchor, window_size, document.len())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::SectionTables;

    fn patterns() -> CategoryPatterns {
        SectionTables::builtin().unwrap().patterns().clone()
    }

    #[test]
    fn test_locate_anchor_and_window() {
        let doc = Document::new(
            "Jane Doe\nWork Experience\nAcme Corp\nBuilt APIs\nShipped things\nEducation\nBSc",
        );
        let spans = locate(&doc, &patterns(), Category::Experience, 3);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].anchor().line_index, 1);
        assert_eq!(spans[0].anchor().text, "Work Experience");
        assert_eq!(spans[0].lines(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let doc = Document::new("Intro\nEducation\nBSc Computer Science");
        let spans = locate(&doc, &patterns(), Category::Education, 3);
        assert_eq!(spans[0].lines(), &[1, 2]);
    }

    #[test]
    fn test_zero_window_is_anchor_only() {
        let doc = Document::new("Education\nMSc");
        let spans = locate(&doc, &patterns(), Category::Education, 0);
        assert_eq!(spans[0].lines(), &[0]);
    }

    #[test]
    fn test_adjacent_matches_not_deduplicated() {
        let doc = Document::new("Experience\nProfessional experience\nAcme");
        let spans = locate(&doc, &patterns(), Category::Experience, 1);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].lines(), &[0, 1]);
        assert_eq!(spans[1].lines(), &[1, 2]);
    }

    #[test]
    fn test_no_match_no_spans() {
        let doc = Document::new("Hobbies\nChess");
        assert!(locate(&doc, &patterns(), Category::Experience, 3).is_empty());
        assert!(locate(&Document::new(""), &patterns(), Category::Education, 3).is_empty());
    }
}
