use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

use super::error_response::error_response;
use super::job_response::JobResponse;

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobResponse>,
    pub count: usize,
}

pub async fn list_jobs_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.job_repository.list_all().await {
        Ok(jobs) => {
            let jobs: Vec<JobResponse> = jobs.iter().map(JobResponse::from).collect();
            let count = jobs.len();
            (StatusCode::OK, Json(JobListResponse { jobs, count })).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list jobs");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list jobs: {}", e),
            )
        }
    }
}
