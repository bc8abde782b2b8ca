use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub jobs: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let jobs = state.job_repository.count().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to count jobs for health check");
        0
    });

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            jobs,
        }),
    )
}
