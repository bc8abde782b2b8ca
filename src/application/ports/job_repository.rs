use crate::domain::{Job, JobId, JobUpdate};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Merges `update` into the stored record and returns the new snapshot.
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<Job, RepositoryError>;

    async fn delete(&self, id: JobId) -> Result<bool, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}
