use std::sync::Arc;

use ai_llm_service::ModelId;
use axum::{extract::State, response::Response};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::analyzer::analyzer_response::{ModelInfo, ModelsResponse},
};

pub async fn models_route(State(state): State<Arc<AppState>>) -> Response {
    let models = ModelId::all()
        .into_iter()
        .map(|m| ModelInfo {
            id: m.as_str(),
            description: m.description(),
        })
        .collect();

    ApiResponse::ok(ModelsResponse {
        current: state.analyzer.model().config().model.as_str(),
        models,
    })
}
