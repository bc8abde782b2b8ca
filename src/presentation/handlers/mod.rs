mod create_job;
mod error_response;
mod health;
mod job_response;
mod job_status;
mod list_jobs;

pub use create_job::{
    CreateJobRequest, CreateJobResponse, JobRequest, ValidationError, create_job_handler,
};
pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use job_response::JobResponse;
pub use job_status::job_status_handler;
pub use list_jobs::{JobListResponse, list_jobs_handler};
