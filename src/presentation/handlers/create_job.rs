use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;

use crate::application::services::TranscriptionMessage;
use crate::domain::{Job, JobStatus};
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub url: Option<String>,
    pub callback_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobResponse {
    pub status: String,
    pub job_id: String,
    pub url: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("url is required")]
    MissingUrl,
    #[error("{field} is not a valid http(s) URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

/// Validated job input.
#[derive(Debug, PartialEq, Eq)]
pub struct JobRequest {
    pub url: String,
    pub callback_url: Option<String>,
}

impl TryFrom<CreateJobRequest> for JobRequest {
    type Error = ValidationError;

    fn try_from(request: CreateJobRequest) -> Result<Self, Self::Error> {
        let url = request
            .url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::MissingUrl)?;
        ensure_http_url("url", &url)?;

        let callback_url = request
            .callback_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        if let Some(callback_url) = &callback_url {
            ensure_http_url("callbackUrl", callback_url)?;
        }

        Ok(Self { url, callback_url })
    }
}

fn ensure_http_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_job_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed job request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let request = match JobRequest::try_from(request) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected invalid job request");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let job = Job::new(request.url, request.callback_url);
    let job_id = job.id;

    if let Err(e) = state.job_repository.create(&job).await {
        tracing::error!(error = %e, "Failed to create job record");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create job: {}", e),
        );
    }

    let msg = TranscriptionMessage {
        job_id,
        source_url: job.source_url.clone(),
    };

    if let Err(e) = state.job_sender.try_send(msg) {
        let reason = match e {
            TrySendError::Full(_) => {
                tracing::warn!(job_id = %job_id, "Transcription queue full");
                "Transcription queue is full"
            }
            TrySendError::Closed(_) => {
                tracing::error!(job_id = %job_id, "Transcription queue closed");
                "Transcription queue unavailable"
            }
        };
        if let Err(e) = state.job_repository.delete(job_id).await {
            tracing::warn!(error = %e, "Failed to drop unqueued job");
        }
        return error_response(StatusCode::SERVICE_UNAVAILABLE, reason);
    }

    tracing::info!(
        job_id = %job_id,
        url = %job.source_url,
        has_callback = job.callback_url.is_some(),
        "Transcription job enqueued"
    );

    (
        StatusCode::ACCEPTED,
        Json(CreateJobResponse {
            status: JobStatus::Queued.as_str().to_string(),
            job_id: job_id.to_string(),
            url: job.source_url,
        }),
    )
        .into_response()
}
