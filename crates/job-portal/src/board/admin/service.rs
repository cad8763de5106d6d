use std::sync::Arc;

use tracing::info;

use crate::board::access::{self, AccessError};
use crate::board::applications::{populate, ApplicationDetails, ApplicationRepository};
use crate::board::identity::{Actor, Role, User, UserId, UserProfile, UserRepository};
use crate::board::jobs::{JobId, JobListing, JobRepository};
use crate::board::store::RepositoryError;

/// A job as the admin console sees it.
#[derive(Debug, Clone)]
pub struct JobOverview {
    pub listing: JobListing,
    pub applicant_count: usize,
}

/// Read access to every collection plus removal of non-admin accounts.
pub struct AdminService {
    users: Arc<dyn UserRepository>,
    jobs: Arc<dyn JobRepository>,
    applications: Arc<dyn ApplicationRepository>,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jobs: Arc<dyn JobRepository>,
        applications: Arc<dyn ApplicationRepository>,
    ) -> Self {
        Self {
            users,
            jobs,
            applications,
        }
    }

    pub fn users(&self, actor: &Actor) -> Result<Vec<UserProfile>, AdminServiceError> {
        access::require_role(actor, Role::Admin)?;
        Ok(self.users.list()?.iter().map(User::profile).collect())
    }

    /// Delete an account. Admin accounts, the caller's included, are refused.
    pub fn remove_user(&self, actor: &Actor, user_id: &UserId) -> Result<User, AdminServiceError> {
        access::require_role(actor, Role::Admin)?;
        let target = self
            .users
            .fetch(user_id)?
            .ok_or(AdminServiceError::UserNotFound)?;
        access::ensure_removable(&target)?;

        self.users.delete(&target.id).map_err(|err| match err {
            RepositoryError::NotFound => AdminServiceError::UserNotFound,
            other => other.into(),
        })?;
        info!(user_id = %target.id, role = %target.role, removed_by = %actor.id, "user removed");
        Ok(target)
    }

    /// Every job with its creator and an applicant count taken from the
    /// application records rather than the job's own list.
    pub fn jobs(&self, actor: &Actor) -> Result<Vec<JobOverview>, AdminServiceError> {
        access::require_role(actor, Role::Admin)?;

        let mut overview = Vec::new();
        for job in self.jobs.list()? {
            let applicant_count = self.applications.count_for_job(&job.id)?;
            let creator = self.users.fetch(&job.created_by)?.map(|user| user.profile());
            overview.push(JobOverview {
                listing: JobListing { job, creator },
                applicant_count,
            });
        }
        Ok(overview)
    }

    /// Applications for a job. An unknown job simply has none.
    pub fn applicants(
        &self,
        actor: &Actor,
        job_id: &JobId,
    ) -> Result<Vec<ApplicationDetails>, AdminServiceError> {
        access::require_role(actor, Role::Admin)?;
        self.applications
            .list_for_job(job_id)?
            .into_iter()
            .map(|application| populate(application, self.jobs.as_ref(), self.users.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(AdminServiceError::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("User not found")]
    UserNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
