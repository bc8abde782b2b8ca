use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::JobId;

#[async_trait]
pub trait ScratchStore: Send + Sync {
    /// Creates the job's workspace directory and returns its path.
    async fn create(&self, job_id: JobId) -> Result<PathBuf, ScratchStoreError>;

    /// Removes the job's workspace. Removing a missing workspace succeeds.
    async fn remove(&self, job_id: JobId) -> Result<(), ScratchStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScratchStoreError {
    #[error("create failed: {0}")]
    CreateFailed(String),
    #[error("cleanup failed: {0}")]
    CleanupFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
