use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Job, JobChanges, JobDraft, JobId, JobListing};
use super::repository::JobRepository;
use crate::board::access::{self, AccessError, OwnedAction};
use crate::board::applications::{populate, ApplicationDetails, ApplicationRepository};
use crate::board::identity::{Actor, Role, UserRepository};
use crate::board::store::RepositoryError;

/// A job on the employer dashboard with the applications that reference it.
#[derive(Debug, Clone)]
pub struct EmployerJob {
    pub listing: JobListing,
    pub applications: Vec<ApplicationDetails>,
}

/// Posting lifecycle: create, merge-update, delete and listings.
pub struct JobService {
    jobs: Arc<dyn JobRepository>,
    users: Arc<dyn UserRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl JobService {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        users: Arc<dyn UserRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            jobs,
            users,
            applications,
        }
    }

    pub fn create(&self, actor: &Actor, draft: JobDraft) -> Result<JobListing, JobServiceError> {
        access::require_role(actor, Role::Employer)?;

        let (Some(title), Some(description), Some(company), Some(location)) = (
            non_blank(draft.title),
            non_blank(draft.description),
            non_blank(draft.company),
            non_blank(draft.location),
        ) else {
            return Err(JobServiceError::MissingFields);
        };

        let now = Utc::now();
        let job = self.jobs.insert(Job {
            id: JobId::generate(),
            title,
            description,
            company,
            location,
            salary: draft.salary,
            created_by: actor.id.clone(),
            applications: Vec::new(),
            created_at: now,
            updated_at: now,
        })?;

        info!(job_id = %job.id, employer = %actor.id, "job created");
        self.listing(job)
    }

    /// Merge the supplied fields over the stored job. Creator only.
    pub fn update(
        &self,
        actor: &Actor,
        job_id: &JobId,
        changes: JobChanges,
    ) -> Result<JobListing, JobServiceError> {
        access::require_role(actor, Role::Employer)?;
        let mut job = self.fetch(job_id)?;
        access::ensure_job_owner(actor, &job, OwnedAction::UpdateJob)?;

        merge_text(&mut job.title, changes.title, "title")?;
        merge_text(&mut job.description, changes.description, "description")?;
        merge_text(&mut job.company, changes.company, "company")?;
        merge_text(&mut job.location, changes.location, "location")?;
        if let Some(salary) = changes.salary {
            job.salary = salary;
        }
        job.updated_at = Utc::now();

        self.jobs.update(job.clone())?;
        info!(job_id = %job.id, "job updated");
        self.listing(job)
    }

    /// Remove a job. Its applications are left in place.
    pub fn delete(&self, actor: &Actor, job_id: &JobId) -> Result<Job, JobServiceError> {
        access::require_role(actor, Role::Employer)?;
        let job = self.fetch(job_id)?;
        access::ensure_job_owner(actor, &job, OwnedAction::DeleteJob)?;

        self.jobs.delete(&job.id).map_err(|err| match err {
            RepositoryError::NotFound => JobServiceError::NotFound,
            other => other.into(),
        })?;
        info!(job_id = %job.id, "job deleted");
        Ok(job)
    }

    /// Every job, unauthenticated.
    pub fn public_listings(&self) -> Result<Vec<JobListing>, JobServiceError> {
        self.jobs
            .list()?
            .into_iter()
            .map(|job| self.listing(job))
            .collect()
    }

    /// The acting employer's jobs, applications derived from `Application::job`.
    pub fn employer_board(&self, actor: &Actor) -> Result<Vec<EmployerJob>, JobServiceError> {
        access::require_role(actor, Role::Employer)?;

        let mut board = Vec::new();
        for job in self.jobs.list_by_creator(&actor.id)? {
            let applications = self
                .applications
                .list_for_job(&job.id)?
                .into_iter()
                .map(|application| {
                    populate(application, self.jobs.as_ref(), self.users.as_ref())
                })
                .collect::<Result<Vec<_>, _>>()?;
            board.push(EmployerJob {
                listing: self.listing(job)?,
                applications,
            });
        }
        Ok(board)
    }

    fn fetch(&self, job_id: &JobId) -> Result<Job, JobServiceError> {
        self.jobs.fetch(job_id)?.ok_or(JobServiceError::NotFound)
    }

    fn listing(&self, job: Job) -> Result<JobListing, JobServiceError> {
        let creator = self.users.fetch(&job.created_by)?.map(|user| user.profile());
        Ok(JobListing { job, creator })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn merge_text(
    slot: &mut String,
    value: Option<String>,
    field: &'static str,
) -> Result<(), JobServiceError> {
    if let Some(value) = value {
        let value = value.trim();
        if value.is_empty() {
            return Err(JobServiceError::BlankField(field));
        }
        *slot = value.to_string();
    }
    Ok(())
}

/// Error raised by the job service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("Job not found")]
    NotFound,
    #[error("All required fields must be provided")]
    MissingFields,
    #[error("{0} cannot be empty")]
    BlankField(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
