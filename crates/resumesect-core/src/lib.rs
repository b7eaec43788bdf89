//! resumesect core — categories, languages, configuration, errors.

pub mod category;
pub mod config;
pub mod error;
pub mod language;

pub use category::Category;
pub use config::{CandidatePolicy, ParserConfig};
pub use error::{Error, Result};
pub use language::Language;
