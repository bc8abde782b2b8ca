#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;

use vidscribe::application::ports::{ExtractionError, MediaExtractor};
use vidscribe::infrastructure::media::YtDlpExtractor;

/// Shell prelude that leaves the `--output` template in `$out` and the last
/// argument in `$url`.
const PARSE_ARGS: &str = r#"#!/bin/sh
out=""
url=""
while [ "$#" -gt 0 ]; do
  if [ "$1" = "--output" ]; then
    shift
    out="$1"
  fi
  url="$1"
  shift
done
"#;

fn write_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-yt-dlp");
    std::fs::write(&path, format!("{}{}", PARSE_ARGS, body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn setup(body: &str, timeout: Duration) -> (TempDir, PathBuf, YtDlpExtractor) {
    let dir = TempDir::new().unwrap();
    let tool = write_tool(dir.path(), body);
    let workspace = dir.path().join("workspace");
    std::fs::create_dir(&workspace).unwrap();
    let extractor = YtDlpExtractor::new(tool, Some("mp3".to_string()), Some(timeout));
    (dir, workspace, extractor)
}

fn message(err: ExtractionError) -> String {
    match err {
        ExtractionError::DownloadFailed(msg) => msg,
    }
}

#[tokio::test]
async fn given_tool_writes_expected_file_when_extracting_then_returns_its_path() {
    let (_dir, workspace, extractor) = setup(
        r#"printf 'audio' > "$(printf '%s' "$out" | sed 's/%(ext)s/mp3/')""#,
        Duration::from_secs(10),
    );

    let path = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap();

    assert_eq!(path, workspace.join("audio.mp3"));
    assert!(path.exists());
}

#[tokio::test]
async fn given_tool_picks_other_extension_when_extracting_then_scan_finds_it() {
    let (_dir, workspace, extractor) = setup(
        r#"printf 'audio' > "$(printf '%s' "$out" | sed 's/%(ext)s/m4a/')""#,
        Duration::from_secs(10),
    );

    let path = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap();

    assert_eq!(path, workspace.join("audio.m4a"));
}

#[tokio::test]
async fn given_tool_produces_nothing_when_extracting_then_reports_missing_audio() {
    let (_dir, workspace, extractor) = setup("exit 0\n", Duration::from_secs(10));

    let err = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap_err();

    assert_eq!(message(err), "audio file was not produced");
}

#[tokio::test]
async fn given_only_non_audio_output_when_extracting_then_reports_missing_audio() {
    let (_dir, workspace, extractor) = setup(
        r#"printf 'x' > "$(dirname "$out")/audio.part""#,
        Duration::from_secs(10),
    );

    let err = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap_err();

    assert!(message(err).contains("not produced"));
}

#[tokio::test]
async fn given_private_video_when_extracting_then_message_says_private() {
    let (_dir, workspace, extractor) = setup(
        "echo 'ERROR: [youtube] abc: Private video. Sign in' >&2\nexit 1\n",
        Duration::from_secs(10),
    );

    let err = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap_err();

    let msg = message(err);
    assert!(msg.contains("private or unavailable"), "{}", msg);
    assert!(msg.contains("exit 1"));
}

#[tokio::test]
async fn given_failing_tool_when_extracting_then_message_carries_stderr() {
    let (_dir, workspace, extractor) = setup(
        "echo 'ERROR: Unsupported URL' >&2\nexit 2\n",
        Duration::from_secs(10),
    );

    let err = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap_err();

    assert_eq!(
        message(err),
        "download tool exited with 2: ERROR: Unsupported URL"
    );
}

#[tokio::test]
async fn given_hanging_tool_when_timeout_elapses_then_reports_timeout() {
    let (_dir, workspace, extractor) = setup("sleep 30\n", Duration::from_millis(200));

    let started = std::time::Instant::now();
    let err = extractor
        .extract_audio("https://example.com/video", &workspace)
        .await
        .unwrap_err();

    assert!(message(err).contains("timed out"));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn given_missing_binary_when_extracting_then_reports_start_failure() {
    let dir = TempDir::new().unwrap();
    let extractor = YtDlpExtractor::new(dir.path().join("does-not-exist"), None, None);

    let err = extractor
        .extract_audio("https://example.com/video", dir.path())
        .await
        .unwrap_err();

    assert!(message(err).starts_with("failed to start"));
}

#[tokio::test]
async fn given_url_with_shell_metacharacters_when_extracting_then_passed_verbatim() {
    let (dir, workspace, extractor) = setup(
        r#"printf '%s' "$url" > "$(dirname "$out")/seen-url.txt"
printf 'audio' > "$(printf '%s' "$out" | sed 's/%(ext)s/mp3/')""#,
        Duration::from_secs(10),
    );
    let url = "https://example.com/v?a=1;touch pwned&b=$(id)";

    extractor.extract_audio(url, &workspace).await.unwrap();

    let seen = std::fs::read_to_string(workspace.join("seen-url.txt")).unwrap();
    assert_eq!(seen, url);
    assert!(!dir.path().join("pwned").exists());
    assert!(!workspace.join("pwned").exists());
}
