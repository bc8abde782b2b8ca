use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::application::ports::JobRepository;
use crate::domain::JobId;

/// Removes finished jobs from the registry once their retention window has
/// elapsed. Pending evictions are dropped on shutdown.
pub struct EvictionScheduler {
    job_repository: Arc<dyn JobRepository>,
    retention: Duration,
    tracker: TaskTracker,
    shutdown: CancellationToken,
}

impl EvictionScheduler {
    pub fn new(job_repository: Arc<dyn JobRepository>, retention: Duration) -> Self {
        Self {
            job_repository,
            retention,
            tracker: TaskTracker::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    pub fn schedule(&self, job_id: JobId) {
        if self.shutdown.is_cancelled() {
            tracing::debug!(job_id = %job_id, "Eviction skipped: scheduler shut down");
            return;
        }

        let job_repository = Arc::clone(&self.job_repository);
        let shutdown = self.shutdown.clone();
        let retention = self.retention;

        self.tracker.spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(retention) => {
                    match job_repository.delete(job_id).await {
                        Ok(true) => tracing::debug!(job_id = %job_id, "Job evicted"),
                        Ok(false) => tracing::debug!(job_id = %job_id, "Job already gone"),
                        Err(e) => tracing::warn!(job_id = %job_id, error = %e, "Eviction failed"),
                    }
                }
                () = shutdown.cancelled() => {
                    tracing::debug!(job_id = %job_id, "Eviction cancelled");
                }
            }
        });
    }

    /// Cancels every pending eviction and waits for the timers to unwind.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.tracker.close();
        self.tracker.wait().await;
        tracing::info!("Eviction scheduler stopped");
    }
}
