use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use code_analyzer::AnalyzerError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::{ApiError, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Analysis pipeline ---
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ApiError) {
        match self {
            AppError::Bind { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("BIND_ERROR", self.to_string()),
            ),
            AppError::Server(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("SERVER_ERROR", self.to_string()),
            ),
            AppError::Analyzer(e) => ApiError::from_analyzer(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(code = body.code, error = ?self, "request failed");
        }
        ApiResponse::<()>::failure(body).into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ai_llm_service::{AiLlmError, ModelError};

    use super::*;

    fn status_of(e: AnalyzerError) -> StatusCode {
        AppError::from(e).status_and_body().0
    }

    #[test]
    fn analyzer_errors_map_to_http_statuses() {
        assert_eq!(
            status_of(AnalyzerError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AnalyzerError::NotFound("a.py".into())),
            StatusCode::NOT_FOUND
        );
        let timeout = || AiLlmError::from(ModelError::Timeout(Duration::from_secs(60)));
        assert_eq!(
            status_of(AnalyzerError::model("a.py", timeout())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AnalyzerError::PackageModel(timeout())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn model_error_message_names_the_file() {
        let e = AppError::from(AnalyzerError::model(
            "a.py",
            ModelError::Network("connection reset".into()).into(),
        ));
        let (_, body) = e.status_and_body();
        assert_eq!(body.code, "MODEL_ERROR");
        assert!(body.message.contains("a.py"));
    }

    #[test]
    fn bind_failure_is_a_server_error() {
        let e = AppError::Bind {
            addr: "127.0.0.1:8000".into(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        let (status, body) = e.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "BIND_ERROR");
    }
}
