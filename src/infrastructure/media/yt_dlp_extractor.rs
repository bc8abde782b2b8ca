use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ExtractionError, MediaExtractor};

/// Extensions accepted as the tool's audio output.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "wav", "opus", "webm"];

const OUTPUT_STEM: &str = "audio";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_DIAGNOSTIC_LEN: usize = 500;

pub struct YtDlpExtractor {
    binary: PathBuf,
    audio_format: String,
    timeout: Duration,
}

impl YtDlpExtractor {
    pub fn new(
        binary: impl Into<PathBuf>,
        audio_format: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            binary: binary.into(),
            audio_format: audio_format.unwrap_or_else(|| "mp3".to_string()),
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    fn build_command(&self, source_url: &str, workspace: &Path) -> Command {
        let template = workspace.join(format!("{}.%(ext)s", OUTPUT_STEM));
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--no-playlist")
            .arg("--extract-audio")
            .args(["--audio-format", &self.audio_format])
            .arg("--output")
            .arg(template)
            .arg("--")
            .arg(source_url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    async fn locate_output(&self, workspace: &Path) -> Result<PathBuf, ExtractionError> {
        let expected = workspace.join(format!("{}.{}", OUTPUT_STEM, self.audio_format));
        if tokio::fs::try_exists(&expected).await.unwrap_or(false) {
            return Ok(expected);
        }

        tracing::debug!(
            expected = %expected.display(),
            "Expected audio file missing, scanning workspace"
        );
        find_audio_file(workspace).await.ok_or_else(|| {
            ExtractionError::DownloadFailed("audio file was not produced".to_string())
        })
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn extract_audio(
        &self,
        source_url: &str,
        workspace: &Path,
    ) -> Result<PathBuf, ExtractionError> {
        tracing::debug!(
            binary = %self.binary.display(),
            source_url = %source_url,
            "Spawning media download"
        );

        let child = self.build_command(source_url, workspace).spawn().map_err(|e| {
            ExtractionError::DownloadFailed(format!(
                "failed to start {}: {}",
                self.binary.display(),
                e
            ))
        })?;

        // Dropping the wait future on timeout kills the child.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                ExtractionError::DownloadFailed(format!("failed to wait for download: {}", e))
            })?,
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Media download timed out");
                return Err(ExtractionError::DownloadFailed(format!(
                    "download timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::DownloadFailed(describe_failure(
                output.status.code(),
                &stderr,
            )));
        }

        let audio_path = self.locate_output(workspace).await?;
        tracing::info!(audio = %audio_path.display(), "Media download completed");
        Ok(audio_path)
    }
}

async fn find_audio_file(workspace: &Path) -> Option<PathBuf> {
    let mut entries = tokio::fs::read_dir(workspace).await.ok()?;
    let mut matches = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if is_audio_file(&path) {
            matches.push(path);
        }
    }
    matches.sort();
    matches.into_iter().next()
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn describe_failure(exit_code: Option<i32>, stderr: &str) -> String {
    let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
    let diagnostic = last_error_line(stderr);

    let lowered = stderr.to_lowercase();
    if lowered.contains("private video") || lowered.contains("video unavailable") {
        return format!("video is private or unavailable (exit {}): {}", code, diagnostic);
    }
    format!("download tool exited with {}: {}", code, diagnostic)
}

fn last_error_line(stderr: &str) -> String {
    let line = stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("no diagnostic output");
    line.chars().take(MAX_DIAGNOSTIC_LEN).collect()
}
