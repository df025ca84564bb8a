use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use code_analyzer::{CacheEntry, validation::validate_package};
use tracing::{info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::analyzer::{
        analyzer_request::FilesRequest,
        analyzer_response::{AnalyzeResponse, CapturedFile},
    },
};

/// Captures the uploaded files into the result store, replacing the previous
/// batch, so later `/analyzer/ai-analyze` calls can refer to them by name.
#[instrument(name = "analyze_route", skip_all, fields(files = body.files.len()))]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilesRequest>,
) -> AppResult<Response> {
    validate_package(&body.files)?;

    let files: Vec<CapturedFile> = body.files.iter().map(CapturedFile::from).collect();
    let generation = state
        .store
        .populate(body.files.into_iter().map(CacheEntry::from))
        .await;

    info!(generation, files = files.len(), "parse batch captured");
    Ok(ApiResponse::ok(AnalyzeResponse { generation, files }))
}
