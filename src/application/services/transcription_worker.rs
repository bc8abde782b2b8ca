use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use super::{TranscriptionMessage, TranscriptionPipeline};

/// Drains the job queue and runs each job's pipeline on its own task.
pub struct TranscriptionWorker {
    receiver: mpsc::Receiver<TranscriptionMessage>,
    pipeline: Arc<TranscriptionPipeline>,
    tracker: TaskTracker,
    shutdown: CancellationToken,
    shutdown_grace: Duration,
}

impl TranscriptionWorker {
    pub fn new(
        receiver: mpsc::Receiver<TranscriptionMessage>,
        pipeline: Arc<TranscriptionPipeline>,
        shutdown: CancellationToken,
        shutdown_grace: Duration,
    ) -> Self {
        Self {
            receiver,
            pipeline,
            tracker: TaskTracker::new(),
            shutdown,
            shutdown_grace,
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Transcription worker started");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.dispatch(msg),
                    None => {
                        tracing::info!("Transcription worker stopped: channel closed");
                        break;
                    }
                },
                () = self.shutdown.cancelled() => {
                    tracing::info!("Transcription worker stopped: shutdown requested");
                    break;
                }
            }
        }

        self.tracker.close();
        if tokio::time::timeout(self.shutdown_grace, self.tracker.wait())
            .await
            .is_err()
        {
            tracing::warn!(
                in_flight = self.tracker.len(),
                "Shutdown grace period elapsed with jobs still running"
            );
        }
    }

    fn dispatch(&self, msg: TranscriptionMessage) {
        let span = tracing::info_span!("transcription_job", job_id = %msg.job_id);
        let pipeline = Arc::clone(&self.pipeline);

        self.tracker.spawn(
            async move {
                match pipeline.run(msg).await {
                    Ok(job) => tracing::info!(status = %job.status, "Transcription job finished"),
                    Err(e) => tracing::error!(error = %e, "Transcription job lost its record"),
                }
            }
            .instrument(span),
        );
    }
}
