use axum::response::Response;
use chrono::Utc;
use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
}

pub async fn health_route() -> Response {
    ApiResponse::ok(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339(),
    })
}
