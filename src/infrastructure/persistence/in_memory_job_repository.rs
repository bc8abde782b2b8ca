use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobUpdate};

/// Process-lifetime job registry. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<JobId, Job>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        match self.jobs.entry(job.id) {
            Entry::Occupied(_) => Err(RepositoryError::ConstraintViolation(format!(
                "job {} already exists",
                job.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(job.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: JobId, update: JobUpdate) -> Result<Job, RepositoryError> {
        let mut entry = self
            .jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.apply(update, Utc::now())?;
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: JobId) -> Result<bool, RepositoryError> {
        Ok(self.jobs.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        let mut jobs: Vec<Job> = self
            .jobs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        jobs.sort_by_key(|job| job.created_at);
        Ok(jobs)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.jobs.len())
    }
}
