use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::audio_file::read_audio;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Upload, submit, then poll until the provider settles on `completed` or
/// `error`. No client-side deadline.
pub struct AssemblyAiEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct TranscriptResponse {
    id: String,
    status: String,
    text: Option<String>,
    error: Option<String>,
}

impl AssemblyAiEngine {
    pub fn new(api_key: String, base_url: Option<String>, poll_interval: Option<Duration>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.assemblyai.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            poll_interval: poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
        }
    }

    async fn upload(&self, audio_data: Vec<u8>) -> Result<String, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(audio_data)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("upload: {}", e)))?;

        let upload: UploadResponse = parse_json(response, "upload").await?;
        Ok(upload.upload_url)
    }

    async fn submit(&self, upload_url: &str) -> Result<TranscriptResponse, TranscriptionError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&TranscriptRequest {
                audio_url: upload_url,
            })
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("submit: {}", e)))?;

        parse_json(response, "submit").await
    }

    async fn fetch(&self, transcript_id: &str) -> Result<TranscriptResponse, TranscriptionError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}", self.base_url, transcript_id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("poll: {}", e)))?;

        parse_json(response, "poll").await
    }
}

#[async_trait]
impl TranscriptionEngine for AssemblyAiEngine {
    async fn transcribe(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data = read_audio(audio_path).await?;
        tracing::debug!(bytes = audio_data.len(), "Uploading audio to AssemblyAI");

        let upload_url = self.upload(audio_data).await?;
        let mut transcript = self.submit(&upload_url).await?;
        let transcript_id = transcript.id.clone();

        loop {
            match transcript.status.as_str() {
                "completed" => {
                    let text = transcript.text.unwrap_or_default();
                    tracing::info!(
                        transcript_id = %transcript_id,
                        chars = text.len(),
                        "AssemblyAI transcription completed"
                    );
                    return Ok(text.trim().to_string());
                }
                "error" => {
                    return Err(TranscriptionError::ProviderFailed(
                        transcript
                            .error
                            .unwrap_or_else(|| "unknown error".to_string()),
                    ));
                }
                status => {
                    tracing::debug!(transcript_id = %transcript_id, status, "Transcript pending");
                }
            }

            tokio::time::sleep(self.poll_interval).await;
            transcript = self.fetch(&transcript_id).await?;
        }
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    stage: &str,
) -> Result<T, TranscriptionError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(TranscriptionError::ApiRequestFailed(format!(
            "{} status {}: {}",
            stage, status, body
        )));
    }

    response.json().await.map_err(|e| {
        TranscriptionError::ApiRequestFailed(format!("{} parse response: {}", stage, e))
    })
}
