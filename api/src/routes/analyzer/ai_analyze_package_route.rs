use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use tracing::instrument;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::analyzer::analyzer_request::FilesRequest,
};

/// Whole-project overview. Only file paths are sent to the model.
#[instrument(name = "ai_analyze_package_route", skip_all, fields(files = body.files.len()))]
pub async fn ai_analyze_package_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilesRequest>,
) -> AppResult<Response> {
    let report = state.analyzer.analyze_package_files(&body.files).await?;
    Ok(ApiResponse::ok(report))
}
