use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Downloads `source_url` and leaves an audio file inside `workspace`.
    async fn extract_audio(
        &self,
        source_url: &str,
        workspace: &Path,
    ) -> Result<PathBuf, ExtractionError>;
}

/// Every download problem (tool failure, timeout, missing output) shares one
/// kind; the message carries the diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("{0}")]
    DownloadFailed(String),
}
