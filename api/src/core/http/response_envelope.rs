//! `{ success, data, error }` envelope of every analyzer endpoint.
//!
//! Failures of the analysis pipeline are rendered from [`AnalyzerError`]
//! directly: the HTTP status, a stable code, the file concerned and whether a
//! retry can help all come from the error itself.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use code_analyzer::AnalyzerError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable, machine-readable code (e.g. "NOT_FOUND").
    pub code: &'static str,
    pub message: String,
    /// File the failure belongs to, for per-file pipeline errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Whether repeating the same request may succeed.
    pub retryable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Request field like `filename` or `files`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            filename: None,
            retryable: false,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, path: Option<String>, hint: Option<String>) -> Self {
        if path.is_some() || hint.is_some() {
            self.details.push(ApiErrorDetail { path, hint });
        }
        self
    }

    /// HTTP status and envelope body for a pipeline failure.
    pub fn from_analyzer(err: &AnalyzerError) -> (StatusCode, Self) {
        let message = err.to_string();
        match err {
            AnalyzerError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                Self::new("VALIDATION_ERROR", message),
            ),
            AnalyzerError::NotFound(filename) => (
                StatusCode::NOT_FOUND,
                Self {
                    filename: Some(filename.clone()),
                    ..Self::new("NOT_FOUND", message)
                }
                .with_detail(
                    Some("content".into()),
                    Some("Send `content`, or capture the file via POST /analyzer/analyze first.".into()),
                ),
            ),
            AnalyzerError::Model { filename, source } => (
                StatusCode::BAD_GATEWAY,
                Self {
                    filename: Some(filename.clone()),
                    retryable: source.is_retryable(),
                    ..Self::new("MODEL_ERROR", message)
                },
            ),
            AnalyzerError::PackageModel(source) => (
                StatusCode::BAD_GATEWAY,
                Self {
                    retryable: source.is_retryable(),
                    ..Self::new("PACKAGE_MODEL_ERROR", message)
                },
            ),
            AnalyzerError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self::new("CONFIG_ERROR", message),
            ),
        }
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// `200 OK` with `data` wrapped in a success envelope.
    pub fn ok(data: T) -> Response {
        Self::success(data).into_response_with_status(StatusCode::OK)
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
