//! Embedding oracle trait and lightweight implementations.
//!
//! The `EmbedderBackend` trait is the only way the extractor reaches a model.
//! Implementations:
//! - `OnnxEmbedder`: transformer model through ONNX Runtime (feature `onnx`)
//! - `HashingEmbedder`: deterministic feature-hashing bag of words
//! - `NoopEmbedder`: always fails; the extractor degrades to unexpanded windows

use ndarray::Array1;
use resumesect_core::{Error, Result};
use sha2::{Digest, Sha256};

/// Result of an embedding operation.
#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    pub embedding: Array1<f32>,
    /// Whether this was served from a memo instead of the model.
    pub cached: bool,
}

/// Text → fixed-length vector oracle.
///
/// Implementations must be deterministic for a fixed model version.
/// Each call is assumed to be expensive.
pub trait EmbedderBackend: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<EmbeddingResult>;

    /// Embed several texts. Failures are reported per text.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Result<EmbeddingResult>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Output dimension.
    fn dimension(&self) -> usize;

    /// Model identifier this backend was built for.
    fn model_id(&self) -> &str;

    /// Whether a model is actually loaded.
    fn is_available(&self) -> bool;
}

/// Placeholder embedder that fails every call.
pub struct NoopEmbedder {
    dim: usize,
}

impl NoopEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl EmbedderBackend for NoopEmbedder {
    fn embed(&self, _text: &str) -> Result<EmbeddingResult> {
        Err(Error::Inference("no embedding model loaded".into()))
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_id(&self) -> &str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Default dimension of the hashing embedder.
pub const DEFAULT_HASHING_DIM: usize = 512;

/// Feature-hashing embedder.
///
/// Lower-cased alphanumeric tokens are hashed with SHA-256 into `dim` buckets
/// with a sign bit, then the vector is L2-normalised. Stable across platforms
/// and releases, so parses stay reproducible without a model.
pub struct HashingEmbedder {
    dim: usize,
    model_id: String,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim: dim.max(1),
            model_id: format!("hashing-{}", dim.max(1)),
        }
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());
        let mut idx = [0u8; 8];
        idx.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(idx) % self.dim as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        (bucket, sign)
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIM)
    }
}

impl EmbedderBackend for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingResult> {
        let mut v = Array1::<f32>::zeros(self.dim);
        let lower = text.to_lowercase();
        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let (bucket, sign) = self.bucket(token);
            v[bucket] += sign;
        }

        let norm = v.dot(&v).sqrt();
        if norm > 0.0 {
            v /= norm;
        }

        Ok(EmbeddingResult {
            embedding: v,
            cached: false,
        })
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn is_available(&self) -> bool {
        true
    }
}
