use std::path::Path;

use crate::application::ports::TranscriptionError;

pub(crate) async fn read_audio(path: &Path) -> Result<Vec<u8>, TranscriptionError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| TranscriptionError::AudioUnreadable(format!("{}: {}", path.display(), e)))
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio")
        .to_string()
}

pub(crate) fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("opus") => "audio/opus",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}
