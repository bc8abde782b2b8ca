use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::assemblyai_engine::AssemblyAiEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TranscriptionProvider {
    #[serde(rename = "assemblyai")]
    AssemblyAi,
    #[serde(rename = "openai")]
    OpenAi,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        poll_interval: Duration,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            TranscriptionError::Misconfigured(format!("API key required for {:?}", provider))
        })?;

        match provider {
            TranscriptionProvider::AssemblyAi => Ok(Arc::new(AssemblyAiEngine::new(
                key,
                base_url,
                Some(poll_interval),
            ))),
            TranscriptionProvider::OpenAi => {
                Ok(Arc::new(OpenAiWhisperEngine::new(key, base_url, model)))
            }
        }
    }
}
