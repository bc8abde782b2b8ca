use std::io;
use std::path::PathBuf;

use crate::application::ports::{ScratchStore, ScratchStoreError};
use crate::domain::JobId;

/// One directory per job under a shared root.
pub struct LocalScratchStore {
    base_path: PathBuf,
}

impl LocalScratchStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ScratchStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ScratchStoreError::Io)?;
        Ok(Self { base_path })
    }

    pub fn workspace_path(&self, job_id: JobId) -> PathBuf {
        self.base_path.join(job_id.to_string())
    }
}

#[async_trait::async_trait]
impl ScratchStore for LocalScratchStore {
    async fn create(&self, job_id: JobId) -> Result<PathBuf, ScratchStoreError> {
        let path = self.workspace_path(job_id);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| ScratchStoreError::CreateFailed(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }

    async fn remove(&self, job_id: JobId) -> Result<(), ScratchStoreError> {
        let path = self.workspace_path(job_id);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScratchStoreError::CleanupFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }
}
