use async_trait::async_trait;

use crate::domain::Job;

#[async_trait]
pub trait CallbackNotifier: Send + Sync {
    /// Delivers the final record of `job` to `callback_url` once.
    async fn notify(&self, callback_url: &str, job: &Job) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("job {0} is not terminal")]
    NotTerminal(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("callback rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
