//! Error types for resumesect.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No reference description for category '{category}' (language '{language}', no English fallback)")]
    MissingReference { category: String, language: String },

    #[error("Invalid pattern for '{name}': {message}")]
    Pattern { name: String, message: String },

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Language detection failed: {0}")]
    Detection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
