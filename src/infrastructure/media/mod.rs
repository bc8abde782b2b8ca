mod yt_dlp_extractor;

pub use yt_dlp_extractor::{AUDIO_EXTENSIONS, YtDlpExtractor};
