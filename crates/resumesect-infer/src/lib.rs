//! resumesect infer — embedding oracle and similarity scoring.
//!
//! Provides the `EmbedderBackend` trait consumed by the section expander.
//! When the `onnx` feature is enabled and model files are present,
//! `OnnxEmbedder` runs the configured transformer. Otherwise the
//! deterministic `HashingEmbedder` stands in.

pub mod cache;
pub mod embedder;
pub mod onnx_embedder;
pub mod similarity;

pub use cache::MemoEmbedder;
pub use embedder::{EmbedderBackend, EmbeddingResult, HashingEmbedder, NoopEmbedder};
pub use similarity::cosine_similarity;

#[cfg(feature = "onnx")]
pub use onnx_embedder::OnnxEmbedder;

use std::sync::Arc;

use resumesect_core::ParserConfig;

/// Create the best available embedder for the configured model.
///
/// Built once per process and shared by reference with every parse.
pub fn create_embedder(config: &ParserConfig) -> Arc<dyn EmbedderBackend> {
    #[cfg(feature = "onnx")]
    {
        if let Some(model_dir) = &config.model_dir {
            match OnnxEmbedder::load(model_dir, &config.embedding_model) {
                Ok(embedder) => {
                    tracing::info!(
                        "Using ONNX embedder {} (dim={})",
                        config.embedding_model,
                        embedder.dimension()
                    );
                    return Arc::new(embedder);
                }
                Err(e) => {
                    tracing::warn!(
                        "ONNX embedder unavailable: {}. Falling back to hashing embedder.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("No model_dir configured. Falling back to hashing embedder.");
        }
    }

    #[cfg(not(feature = "onnx"))]
    {
        tracing::info!(
            "ONNX feature disabled, model {} not loaded. Using hashing embedder.",
            config.embedding_model
        );
    }

    Arc::new(HashingEmbedder::default())
}
