use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, JobApplications,
    ResumeFile, Submission,
};
use super::repository::{populate, ApplicationRepository};
use super::resume::{ResumeError, ResumeKey, ResumeStore};
use crate::board::access::{self, AccessError, OwnedAction};
use crate::board::identity::{Actor, Role, UserRepository};
use crate::board::jobs::{Job, JobId, JobRepository};
use crate::board::store::RepositoryError;

/// Submission, review and resume delivery for job applications.
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobRepository>,
    users: Arc<dyn UserRepository>,
    resumes: Arc<dyn ResumeStore>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobRepository>,
        users: Arc<dyn UserRepository>,
        resumes: Arc<dyn ResumeStore>,
    ) -> Self {
        Self {
            applications,
            jobs,
            users,
            resumes,
        }
    }

    /// Apply to a job as a jobseeker.
    ///
    /// The application is written first and the job's id list second; the two
    /// writes are independent, so readers treat `Application::job` as truth.
    pub fn apply(
        &self,
        actor: &Actor,
        submission: Submission,
    ) -> Result<ApplicationDetails, ApplicationServiceError> {
        access::require_role(actor, Role::Jobseeker)?;

        let job_id = submission
            .job_id
            .map(|raw| JobId(raw.trim().to_string()))
            .ok_or(ApplicationServiceError::JobNotFound)?;
        let job = self
            .jobs
            .fetch(&job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;

        if self.applications.find_for(&job.id, &actor.id)?.is_some() {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let resume = match submission.resume {
            Some(upload) => Some(self.resumes.save(&upload)?),
            None => None,
        };

        let now = Utc::now();
        let inserted = self.applications.insert(Application {
            id: ApplicationId::generate(),
            job: job.id.clone(),
            applicant: actor.id.clone(),
            cover_letter: submission.cover_letter,
            resume: resume.clone(),
            status: ApplicationStatus::default(),
            created_at: now,
            updated_at: now,
        });
        let application = match inserted {
            Ok(application) => application,
            Err(err) => {
                if let Some(key) = resume {
                    self.discard(&key);
                }
                return Err(err.into());
            }
        };

        if let Err(err) = self
            .jobs
            .push_application(&job.id, application.id.clone())
        {
            warn!(
                job_id = %job.id,
                application_id = %application.id,
                error = %err,
                "application stored but job list not updated"
            );
        }

        info!(
            job_id = %job.id,
            application_id = %application.id,
            applicant = %actor.id,
            "application submitted"
        );
        Ok(populate(application, self.jobs.as_ref(), self.users.as_ref())?)
    }

    /// Applications submitted by the acting jobseeker.
    pub fn mine(&self, actor: &Actor) -> Result<Vec<ApplicationDetails>, ApplicationServiceError> {
        access::require_role(actor, Role::Jobseeker)?;
        self.populate_all(self.applications.list_for_applicant(&actor.id)?)
    }

    /// Applications received for a job, visible only to the employer that posted it.
    pub fn for_job(
        &self,
        actor: &Actor,
        job_id: &JobId,
    ) -> Result<JobApplications, ApplicationServiceError> {
        access::require_role(actor, Role::Employer)?;
        let job = self.owned_job(actor, job_id, OwnedAction::ViewApplications)?;
        let applications = self.populate_all(self.applications.list_for_job(&job.id)?)?;
        Ok(JobApplications {
            job_title: job.title,
            applications,
        })
    }

    /// Replace the status of an application. The value is validated before any lookup.
    pub fn set_status(
        &self,
        actor: &Actor,
        application_id: &ApplicationId,
        requested: Option<&str>,
    ) -> Result<ApplicationDetails, ApplicationServiceError> {
        access::require_role(actor, Role::Employer)?;
        let status = requested
            .and_then(ApplicationStatus::parse)
            .ok_or(ApplicationServiceError::InvalidStatus)?;

        let mut application = self.fetch(application_id)?;
        self.owned_job(actor, &application.job, OwnedAction::UpdateApplication)?;

        let previous = application.status;
        application.status = status;
        application.updated_at = Utc::now();
        self.applications.update(application.clone())?;

        info!(
            application_id = %application.id,
            from = %previous,
            to = %status,
            "application status updated"
        );
        Ok(populate(application, self.jobs.as_ref(), self.users.as_ref())?)
    }

    /// Resume download for the employer owning the application's job.
    pub fn resume(
        &self,
        actor: &Actor,
        application_id: &ApplicationId,
    ) -> Result<ResumeFile, ApplicationServiceError> {
        access::require_role(actor, Role::Employer)?;
        let application = self.fetch(application_id)?;
        self.owned_job(actor, &application.job, OwnedAction::DownloadResume)?;

        let key = application
            .resume
            .ok_or(ApplicationServiceError::ResumeMissing)?;
        self.read(&key)
    }

    /// Serve a stored file by its public key to the applicant, an admin, or the
    /// owning employer.
    pub fn stored_resume(
        &self,
        actor: &Actor,
        key: &ResumeKey,
    ) -> Result<ResumeFile, ApplicationServiceError> {
        let application = self
            .applications
            .find_by_resume(key)?
            .ok_or(ApplicationServiceError::ResumeMissing)?;
        let job = self.jobs.fetch(&application.job)?;
        access::ensure_resume_reader(actor, &application, job.as_ref())?;
        self.read(key)
    }

    fn read(&self, key: &ResumeKey) -> Result<ResumeFile, ApplicationServiceError> {
        let bytes = self.resumes.load(key).map_err(|err| match err {
            ResumeError::NotFound | ResumeError::OutsideStore(_) => {
                ApplicationServiceError::ResumeMissing
            }
            other => other.into(),
        })?;
        let file_name = key.file_name().unwrap_or("resume").to_string();
        Ok(ResumeFile { file_name, bytes })
    }

    /// Drop a file that no record will ever reference.
    fn discard(&self, key: &ResumeKey) {
        if let Err(err) = self.resumes.remove(key) {
            warn!(resume = %key.url_path(), error = %err, "orphaned resume left on disk");
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)
    }

    fn owned_job(
        &self,
        actor: &Actor,
        job_id: &JobId,
        action: OwnedAction,
    ) -> Result<Job, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;
        access::ensure_job_owner(actor, &job, action)?;
        Ok(job)
    }

    fn populate_all(
        &self,
        applications: Vec<Application>,
    ) -> Result<Vec<ApplicationDetails>, ApplicationServiceError> {
        applications
            .into_iter()
            .map(|application| populate(application, self.jobs.as_ref(), self.users.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApplicationServiceError::from)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("Job not found")]
    JobNotFound,
    #[error("Application not found")]
    ApplicationNotFound,
    #[error("You have already applied for this job")]
    AlreadyApplied,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Resume not found")]
    ResumeMissing,
    #[error(transparent)]
    Resume(#[from] ResumeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
