use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{CallbackNotifier, NotificationError};
use crate::domain::Job;

use super::CallbackPayload;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Single-shot JSON POST of a job's final record. Never retries.
pub struct WebhookNotifier {
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(timeout: Option<Duration>) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| NotificationError::RequestFailed(format!("client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CallbackNotifier for WebhookNotifier {
    async fn notify(&self, callback_url: &str, job: &Job) -> Result<(), NotificationError> {
        let payload = CallbackPayload::from_job(job)
            .ok_or_else(|| NotificationError::NotTerminal(job.id.to_string()))?;

        tracing::debug!(callback_url = %callback_url, status = %job.status, "Sending callback");

        let response = self
            .client
            .post(callback_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected { status, body });
        }

        Ok(())
    }
}
