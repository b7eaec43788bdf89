//! Per-parse embedding memo.
//!
//! Wraps a backend for the duration of one parse so that a text embedded twice
//! (the reference description of a category shared by several anchors, or a
//! window that two overlapping anchors start from) hits the model once.
//! The memo is dropped with the parse; nothing carries over between calls.

use std::collections::HashMap;

use ndarray::Array1;
use parking_lot::Mutex;
use resumesect_core::Result;

use crate::embedder::{EmbedderBackend, EmbeddingResult};

/// Upper bound on memoised texts per parse.
pub const DEFAULT_MEMO_CAPACITY: usize = 4096;

/// Memoising view over an `EmbedderBackend`.
pub struct MemoEmbedder<'a> {
    inner: &'a dyn EmbedderBackend,
    entries: Mutex<MemoInner>,
}

struct MemoInner {
    map: HashMap<String, Array1<f32>>,
    capacity: usize,
    hits: usize,
    misses: usize,
}

impl<'a> MemoEmbedder<'a> {
    pub fn new(inner: &'a dyn EmbedderBackend) -> Self {
        Self::with_capacity(inner, DEFAULT_MEMO_CAPACITY)
    }

    pub fn with_capacity(inner: &'a dyn EmbedderBackend, capacity: usize) -> Self {
        Self {
            inner,
            entries: Mutex::new(MemoInner {
                map: HashMap::new(),
                capacity,
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// (hits, misses) so far.
    pub fn stats(&self) -> (usize, usize) {
        let inner = self.entries.lock();
        (inner.hits, inner.misses)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmbedderBackend for MemoEmbedder<'_> {
    fn embed(&self, text: &str) -> Result<EmbeddingResult> {
        {
            let mut entries = self.entries.lock();
            if let Some(v) = entries.map.get(text).cloned() {
                entries.hits += 1;
                return Ok(EmbeddingResult {
                    embedding: v,
                    cached: true,
                });
            }
            entries.misses += 1;
        }

        // Failures are not memoised; the caller decides what a failure means.
        let result = self.inner.embed(text)?;

        let mut entries = self.entries.lock();
        if entries.map.len() < entries.capacity {
            entries
                .map
                .insert(text.to_string(), result.embedding.clone());
        }
        Ok(result)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::{HashingEmbedder, NoopEmbedder};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingEmbedder {
        calls: AtomicUsize,
        inner: HashingEmbedder,
    }

    impl EmbedderBackend for CountingEmbedder {
        fn embed(&self, text: &str) -> Result<EmbeddingResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed(text)
        }
        fn dimension(&self) -> usize {
            self.inner.dimension()
        }
        fn model_id(&self) -> &str {
            "counting"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_memo_hit_and_miss() {
        let backend = CountingEmbedder {
            calls: AtomicUsize::new(0),
            inner: HashingEmbedder::new(32),
        };
        let memo = MemoEmbedder::new(&backend);

        let first = memo.embed("experience").unwrap();
        let second = memo.embed("experience").unwrap();
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.embedding, second.embedding);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.stats(), (1, 1));
    }

    #[test]
    fn test_memo_capacity() {
        let backend = HashingEmbedder::new(8);
        let memo = MemoEmbedder::with_capacity(&backend, 2);
        memo.embed("a").unwrap();
        memo.embed("b").unwrap();
        memo.embed("c").unwrap();
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_memo_does_not_store_failures() {
        let backend = NoopEmbedder::new(8);
        let memo = MemoEmbedder::new(&backend);
        assert!(memo.embed("x").is_err());
        assert!(memo.is_empty());
        assert_eq!(memo.model_id(), "noop");
    }
}
