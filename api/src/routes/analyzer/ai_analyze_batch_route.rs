use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use code_analyzer::AnalyzerError;
use tracing::instrument;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::analyzer::{
        analyzer_request::FilesRequest,
        analyzer_response::{BatchItem, BatchResponse},
    },
};

/// AI analysis of several files. Per-file failures are reported inline and
/// never fail the request.
#[instrument(name = "ai_analyze_batch_route", skip_all, fields(files = body.files.len()))]
pub async fn ai_analyze_batch_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilesRequest>,
) -> AppResult<Response> {
    if body.files.is_empty() {
        return Err(AnalyzerError::Validation("at least one file is required".into()).into());
    }

    let results: Vec<BatchItem> = state
        .analyzer
        .analyze_batch(body.files)
        .await
        .into_iter()
        .map(BatchItem::from)
        .collect();
    let failed = results.iter().filter(|r| !r.success).count();

    Ok(ApiResponse::ok(BatchResponse {
        total: results.len(),
        failed,
        results,
    }))
}
