use ai_llm_service::{ModelClientConfig, OpenAiService};
use code_analyzer::{AnalysisOrchestrator, ResultStore};

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// AI analysis pipeline bound to the configured model.
    pub analyzer: AnalysisOrchestrator<OpenAiService>,
    /// Code text captured by the latest `/analyzer/analyze` batch.
    pub store: ResultStore,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(AnalysisOrchestrator::from_env()?))
    }

    /// State over an explicit model client config and an empty store.
    pub fn from_config(cfg: ModelClientConfig) -> AppResult<Self> {
        Ok(Self::new(AnalysisOrchestrator::from_config(cfg)?))
    }

    pub fn new(analyzer: AnalysisOrchestrator<OpenAiService>) -> Self {
        Self {
            analyzer,
            store: ResultStore::new(),
        }
    }
}
