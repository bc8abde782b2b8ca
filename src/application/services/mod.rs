mod eviction_scheduler;
mod transcription_pipeline;
mod transcription_worker;

pub use eviction_scheduler::EvictionScheduler;
pub use transcription_pipeline::{PipelineError, TranscriptionMessage, TranscriptionPipeline};
pub use transcription_worker::TranscriptionWorker;
