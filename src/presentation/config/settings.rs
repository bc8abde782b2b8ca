use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::audio::TranscriptionProvider;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub extraction: ExtractionSettings,
    pub jobs: JobSettings,
    pub callback: CallbackSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub shutdown_grace_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub binary: String,
    pub audio_format: String,
    pub timeout_secs: u64,
    pub scratch_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    pub retention_secs: u64,
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackSettings {
    pub timeout_secs: u64,
}

impl Settings {
    /// Defaults, then `appsettings.<env>` if present, then `APP_*` variables
    /// (`APP_SERVER__PORT`), then `PORT`. `ASSEMBLYAI_API_KEY` is applied last
    /// and only when AssemblyAI is the selected provider.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let scratch_dir = std::env::temp_dir().join("vidscribe");

        let mut settings: Settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.shutdown_grace_secs", 30)?
            .set_default("transcription.provider", "assemblyai")?
            .set_default("transcription.poll_interval_ms", 3000)?
            .set_default("extraction.binary", "yt-dlp")?
            .set_default("extraction.audio_format", "mp3")?
            .set_default("extraction.timeout_secs", 300)?
            .set_default("extraction.scratch_dir", scratch_dir.to_string_lossy().to_string())?
            .set_default("jobs.retention_secs", 3600)?
            .set_default("jobs.queue_capacity", 256)?
            .set_default("callback.timeout_secs", 30)?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?
            .try_deserialize()?;

        settings
            .transcription
            .apply_assemblyai_key(std::env::var("ASSEMBLYAI_API_KEY").ok());
        Ok(settings)
    }
}

impl ServerSettings {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl TranscriptionSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Replaces `api_key` with a non-blank `key` when the provider is
    /// AssemblyAI. Other providers keep their configured key.
    pub fn apply_assemblyai_key(&mut self, key: Option<String>) {
        if self.provider != TranscriptionProvider::AssemblyAi {
            return;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }
}

impl ExtractionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl JobSettings {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }
}

impl CallbackSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
