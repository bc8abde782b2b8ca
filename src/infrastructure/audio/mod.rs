mod assemblyai_engine;
mod audio_file;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use assemblyai_engine::AssemblyAiEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
