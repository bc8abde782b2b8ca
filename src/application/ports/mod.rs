mod callback_notifier;
mod job_repository;
mod media_extractor;
mod repository_error;
mod scratch_store;
mod transcription_engine;

pub use callback_notifier::{CallbackNotifier, NotificationError};
pub use job_repository::JobRepository;
pub use media_extractor::{ExtractionError, MediaExtractor};
pub use repository_error::RepositoryError;
pub use scratch_store::{ScratchStore, ScratchStoreError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
