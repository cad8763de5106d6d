use super::domain::{Job, JobId};
use crate::board::applications::ApplicationId;
use crate::board::identity::UserId;
use crate::board::store::RepositoryError;

/// Storage abstraction for postings. Listings come back in insertion order.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    fn update(&self, job: Job) -> Result<(), RepositoryError>;
    fn delete(&self, id: &JobId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<Job>, RepositoryError>;
    fn list_by_creator(&self, creator: &UserId) -> Result<Vec<Job>, RepositoryError>;
    /// Single-record append to the job's application list.
    fn push_application(&self, id: &JobId, application: ApplicationId)
        -> Result<(), RepositoryError>;
}
