mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CallbackSettings, ExtractionSettings, JobSettings, ServerSettings, Settings,
    TranscriptionSettings,
};
