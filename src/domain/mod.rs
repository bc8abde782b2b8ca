mod job;
mod job_id;
mod job_status;

pub use job::{Job, JobTransitionError, JobUpdate};
pub use job_id::JobId;
pub use job_status::JobStatus;
