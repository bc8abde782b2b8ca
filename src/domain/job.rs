use super::{JobId, JobStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub source_url: String,
    pub callback_url: Option<String>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failed_at: Option<DateTime<Utc>>,
    pub transcript: Option<String>,
    pub error: Option<String>,
}

/// A patch the pipeline merges into a stored job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobUpdate {
    Processing,
    Downloading,
    Transcribing,
    Completed { transcript: String },
    Failed { error: String },
}

impl JobUpdate {
    pub fn target_status(&self) -> JobStatus {
        match self {
            JobUpdate::Processing => JobStatus::Processing,
            JobUpdate::Downloading => JobStatus::Downloading,
            JobUpdate::Transcribing => JobStatus::Transcribing,
            JobUpdate::Completed { .. } => JobStatus::Completed,
            JobUpdate::Failed { .. } => JobStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid job transition: {from} -> {to}")]
pub struct JobTransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

impl Job {
    pub fn new(source_url: String, callback_url: Option<String>) -> Self {
        Self {
            id: JobId::new(),
            source_url,
            callback_url,
            status: JobStatus::Queued,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            failed_at: None,
            transcript: None,
            error: None,
        }
    }

    /// Applies `update` at time `now`. The record is left untouched when the
    /// transition is not allowed.
    pub fn apply(
        &mut self,
        update: JobUpdate,
        now: DateTime<Utc>,
    ) -> Result<(), JobTransitionError> {
        let next = update.target_status();
        if !self.status.can_transition_to(next) {
            return Err(JobTransitionError {
                from: self.status,
                to: next,
            });
        }

        match update {
            JobUpdate::Processing | JobUpdate::Downloading | JobUpdate::Transcribing => {
                self.started_at.get_or_insert(now);
            }
            JobUpdate::Completed { transcript } => {
                self.transcript = Some(transcript);
                self.completed_at = Some(now);
            }
            JobUpdate::Failed { error } => {
                self.error = Some(error);
                self.failed_at = Some(now);
            }
        }
        self.status = next;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
