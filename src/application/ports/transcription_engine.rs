use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio file unreadable: {0}")]
    AudioUnreadable(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("provider reported failure: {0}")]
    ProviderFailed(String),
    #[error("engine misconfigured: {0}")]
    Misconfigured(String),
}
