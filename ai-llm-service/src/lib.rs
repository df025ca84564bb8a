//! Remote language-model access for the analyzer.
//!
//! - [`config`]: allow-listed models and the client configuration (env-driven)
//! - [`services`]: the [`ChatCompletion`](services::ChatCompletion) seam and the
//!   OpenAI-compatible implementation with proxy routing and transport retries
//! - [`error_handler`]: unified [`AiLlmError`](error_handler::AiLlmError)
//! - [`telemetry`]: a tracing layer scoped to this crate

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::ModelClientConfig, model_id::ModelId};
pub use error_handler::{AiLlmError, ConfigError, ModelError};
pub use services::{ChatCompletion, open_ai_service::OpenAiService};
