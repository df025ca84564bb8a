use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::Response,
};
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::analyzer::analyzer_request::AiAnalyzeRequest,
};

/// AI analysis of one file, from inline `content` or from the result store.
#[instrument(
    name = "ai_analyze_route",
    skip(state, headers, body),
    fields(filename = %body.filename, inline = body.content.is_some())
)]
pub async fn ai_analyze_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AiAnalyzeRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let result = match body.content {
        Some(code) => state.analyzer.analyze_code_text(&code, &body.filename).await?,
        None => {
            state
                .analyzer
                .analyze_cached(&state.store, &body.filename)
                .await?
        }
    };
    Ok(ApiResponse::ok(result))
}
