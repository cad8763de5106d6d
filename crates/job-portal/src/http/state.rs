use std::sync::Arc;

use axum::extract::FromRef;

use crate::board::admin::AdminService;
use crate::board::applications::{ApplicationService, ResumeStore};
use crate::board::identity::{AccountService, Argon2Passwords, TokenIssuer};
use crate::board::jobs::JobService;
use crate::board::store::Repositories;

/// Shared router state. Handlers pull the service they need via `FromRef`.
#[derive(Clone)]
pub struct PortalState {
    pub accounts: Arc<AccountService>,
    pub jobs: Arc<JobService>,
    pub applications: Arc<ApplicationService>,
    pub admin: Arc<AdminService>,
    pub max_upload_bytes: usize,
}

impl PortalState {
    pub fn new(
        repositories: Repositories,
        resumes: Arc<dyn ResumeStore>,
        passwords: Argon2Passwords,
        tokens: TokenIssuer,
        max_upload_bytes: usize,
    ) -> Self {
        let Repositories {
            users,
            jobs,
            applications,
        } = repositories;

        Self {
            accounts: Arc::new(AccountService::new(users.clone(), passwords, tokens)),
            jobs: Arc::new(JobService::new(
                jobs.clone(),
                users.clone(),
                applications.clone(),
            )),
            applications: Arc::new(ApplicationService::new(
                applications.clone(),
                jobs.clone(),
                users.clone(),
                resumes,
            )),
            admin: Arc::new(AdminService::new(users, jobs, applications)),
            max_upload_bytes,
        }
    }
}

impl FromRef<PortalState> for Arc<AccountService> {
    fn from_ref(state: &PortalState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<PortalState> for Arc<JobService> {
    fn from_ref(state: &PortalState) -> Self {
        state.jobs.clone()
    }
}

impl FromRef<PortalState> for Arc<ApplicationService> {
    fn from_ref(state: &PortalState) -> Self {
        state.applications.clone()
    }
}

impl FromRef<PortalState> for Arc<AdminService> {
    fn from_ref(state: &PortalState) -> Self {
        state.admin.clone()
    }
}
