//! Input document model.

/// Full input text as an ordered sequence of lines. Immutable for one parse.
#[derive(Debug, Clone, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split `text` on `\n`, dropping a trailing `\r` from each line.
    ///
    /// Empty text has no lines. Otherwise a trailing newline yields a final
    /// empty line, as converters commonly emit.
    pub fn new(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the given lines with `sep`. Out-of-range indices are skipped.
    pub fn join(&self, indices: &[usize], sep: &str) -> String {
        indices
            .iter()
            .filter_map(|&i| self.line(i))
            .collect::<Vec<_>>()
            .join(sep)
    }
}

/// Remove everything except alphanumerics, `_` and whitespace (newlines kept).
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
