use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Job, JobStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallbackPayload {
    Completed(CompletedPayload),
    Failed(FailedPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPayload {
    pub job_id: String,
    pub url: String,
    pub transcript: String,
    pub status: &'static str,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedPayload {
    pub job_id: String,
    pub url: String,
    pub error: String,
    pub status: &'static str,
    pub failed_at: DateTime<Utc>,
}

impl CallbackPayload {
    /// `None` while the job has not reached a terminal status.
    pub fn from_job(job: &Job) -> Option<Self> {
        match job.status {
            JobStatus::Completed => Some(Self::Completed(CompletedPayload {
                job_id: job.id.to_string(),
                url: job.source_url.clone(),
                transcript: job.transcript.clone().unwrap_or_default(),
                status: JobStatus::Completed.as_str(),
                completed_at: job.completed_at?,
            })),
            JobStatus::Failed => Some(Self::Failed(FailedPayload {
                job_id: job.id.to_string(),
                url: job.source_url.clone(),
                error: job.error.clone().unwrap_or_default(),
                status: JobStatus::Failed.as_str(),
                failed_at: job.failed_at?,
            })),
            _ => None,
        }
    }
}
