//! Crate-wide error hierarchy for code-analyzer.
//!
//! - `Config` is fatal: the orchestrator cannot be built.
//! - `Model`, `NotFound`, `Validation` are per request and never affect other
//!   files or requests.
//! - Malformed model output is not an error at all; see [`crate::parser`].

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Root error type for the code-analyzer crate.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Missing credentials or unsupported model (start-up only).
    #[error("configuration error: {0}")]
    Config(#[source] AiLlmError),

    /// A remote call for `filename` failed after the transport retry budget.
    #[error("analysis of {filename} failed: {source}")]
    Model {
        filename: String,
        #[source]
        source: AiLlmError,
    },

    /// The package-structure call failed after the transport retry budget.
    #[error("package structure analysis failed: {0}")]
    PackageModel(#[source] AiLlmError),

    /// No code text was captured for this filename by the latest parse batch.
    #[error("no parsed code cached for {0}")]
    NotFound(String),

    /// Request rejected before any remote call.
    #[error("validation error: {0}")]
    Validation(String),
}

impl AnalyzerError {
    /// Wraps a model failure with the file it belongs to.
    pub fn model(filename: impl Into<String>, source: AiLlmError) -> Self {
        AnalyzerError::Model {
            filename: filename.into(),
            source,
        }
    }
}

impl From<ai_llm_service::ConfigError> for AnalyzerError {
    fn from(e: ai_llm_service::ConfigError) -> Self {
        AnalyzerError::Config(e.into())
    }
}
