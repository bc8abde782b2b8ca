use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::application::ports::{
    CallbackNotifier, ExtractionError, JobRepository, MediaExtractor, RepositoryError,
    ScratchStore, ScratchStoreError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{Job, JobId, JobUpdate};

use super::EvictionScheduler;

pub struct TranscriptionMessage {
    pub job_id: JobId,
    pub source_url: String,
}

/// Runs one job from `queued` to a terminal status, then cleans up,
/// notifies and schedules eviction.
pub struct TranscriptionPipeline {
    job_repository: Arc<dyn JobRepository>,
    scratch_store: Arc<dyn ScratchStore>,
    media_extractor: Arc<dyn MediaExtractor>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    callback_notifier: Arc<dyn CallbackNotifier>,
    eviction_scheduler: Arc<EvictionScheduler>,
}

impl TranscriptionPipeline {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        scratch_store: Arc<dyn ScratchStore>,
        media_extractor: Arc<dyn MediaExtractor>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        callback_notifier: Arc<dyn CallbackNotifier>,
        eviction_scheduler: Arc<EvictionScheduler>,
    ) -> Self {
        Self {
            job_repository,
            scratch_store,
            media_extractor,
            transcription_engine,
            callback_notifier,
            eviction_scheduler,
        }
    }

    /// Returns the final record, or an error when the registry refused the
    /// terminal update. A panic in any step fails the job like any other
    /// error.
    pub async fn run(&self, msg: TranscriptionMessage) -> Result<Job, PipelineError> {
        let job_id = msg.job_id;

        let outcome = AssertUnwindSafe(self.execute(job_id, &msg.source_url))
            .catch_unwind()
            .await;
        let update = match outcome {
            Ok(Ok(transcript)) => {
                tracing::info!(chars = transcript.len(), "Transcription completed");
                JobUpdate::Completed { transcript }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Transcription job failed");
                JobUpdate::Failed {
                    error: e.to_string(),
                }
            }
            Err(panic) => {
                let error = format!("internal error: {}", panic_message(panic.as_ref()));
                tracing::error!(error = %error, "Transcription job panicked");
                JobUpdate::Failed { error }
            }
        };

        // The workspace is gone before the terminal status is visible.
        if let Err(e) = self.scratch_store.remove(job_id).await {
            tracing::warn!(error = %e, "Failed to remove scratch workspace");
        }

        let final_job = self.update_status(job_id, update).await;

        if let Ok(job) = &final_job {
            if let Some(callback_url) = job.callback_url.as_deref() {
                self.notify(callback_url, job).await;
            }
        }

        self.eviction_scheduler.schedule(job_id);

        final_job
    }

    async fn execute(&self, job_id: JobId, source_url: &str) -> Result<String, PipelineError> {
        self.update_status(job_id, JobUpdate::Processing).await?;

        let workspace = self
            .scratch_store
            .create(job_id)
            .await
            .map_err(PipelineError::Workspace)?;

        self.update_status(job_id, JobUpdate::Downloading).await?;
        tracing::debug!(workspace = %workspace.display(), "Starting media extraction");

        let audio_path = self
            .media_extractor
            .extract_audio(source_url, &workspace)
            .await
            .map_err(PipelineError::Download)?;

        self.update_status(job_id, JobUpdate::Transcribing).await?;
        tracing::debug!(audio = %audio_path.display(), "Starting audio transcription");

        self.transcription_engine
            .transcribe(&audio_path)
            .await
            .map_err(PipelineError::Transcription)
    }

    async fn notify(&self, callback_url: &str, job: &Job) {
        let delivery = AssertUnwindSafe(self.callback_notifier.notify(callback_url, job))
            .catch_unwind()
            .await;
        match delivery {
            Ok(Ok(())) => tracing::info!(callback_url = %callback_url, "Callback delivered"),
            Ok(Err(e)) => tracing::warn!(
                error = %e,
                callback_url = %callback_url,
                "Callback delivery failed"
            ),
            Err(panic) => tracing::error!(
                error = %panic_message(panic.as_ref()),
                callback_url = %callback_url,
                "Callback notifier panicked"
            ),
        }
    }

    async fn update_status(&self, job_id: JobId, update: JobUpdate) -> Result<Job, PipelineError> {
        tracing::debug!(status = %update.target_status(), "Job status transition");
        self.job_repository
            .update(job_id, update)
            .await
            .map_err(PipelineError::Repository)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("workspace unavailable: {0}")]
    Workspace(ScratchStoreError),
    #[error("download failed: {0}")]
    Download(ExtractionError),
    #[error("transcription failed: {0}")]
    Transcription(TranscriptionError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
