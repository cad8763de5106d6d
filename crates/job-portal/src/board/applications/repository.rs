use super::domain::{Application, ApplicationDetails, ApplicationId};
use super::resume::ResumeKey;
use crate::board::identity::{UserId, UserRepository};
use crate::board::jobs::{JobId, JobRepository};
use crate::board::store::RepositoryError;

/// Storage abstraction for applications. Uniqueness of (job, applicant) is
/// not enforced here; the service pre-checks it.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn update(&self, application: Application) -> Result<(), RepositoryError>;
    fn find_for(
        &self,
        job: &JobId,
        applicant: &UserId,
    ) -> Result<Option<Application>, RepositoryError>;
    fn find_by_resume(&self, resume: &ResumeKey) -> Result<Option<Application>, RepositoryError>;
    fn list_for_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError>;
    fn list_for_applicant(&self, applicant: &UserId) -> Result<Vec<Application>, RepositoryError>;
    fn count_for_job(&self, job: &JobId) -> Result<usize, RepositoryError>;
}

/// Resolve the job and applicant an application points at.
pub fn populate(
    application: Application,
    jobs: &dyn JobRepository,
    users: &dyn UserRepository,
) -> Result<ApplicationDetails, RepositoryError> {
    let job = jobs.fetch(&application.job)?.map(|job| job.summary());
    let applicant = users
        .fetch(&application.applicant)?
        .map(|user| user.profile());
    Ok(ApplicationDetails {
        application,
        job,
        applicant,
    })
}
