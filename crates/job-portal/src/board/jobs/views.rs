use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{JobId, JobListing};
use crate::board::applications::{ApplicationId, ApplicationView};
use crate::board::identity::UserProfile;

/// Wire shape shared by every job listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub created_by: Option<UserProfile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobView {
    fn from_listing(listing: JobListing) -> (Self, Vec<ApplicationId>) {
        let JobListing { job, creator } = listing;
        let view = Self {
            id: job.id,
            title: job.title,
            description: job.description,
            company: job.company,
            location: job.location,
            salary: job.salary,
            created_by: creator,
            created_at: job.created_at,
            updated_at: job.updated_at,
        };
        (view, job.applications)
    }
}

/// Public and owner-facing representation, carrying the stored id list.
#[derive(Debug, Clone, Serialize)]
pub struct PostedJobView {
    #[serde(flatten)]
    pub job: JobView,
    pub applications: Vec<ApplicationId>,
}

impl From<JobListing> for PostedJobView {
    fn from(listing: JobListing) -> Self {
        let (job, applications) = JobView::from_listing(listing);
        Self { job, applications }
    }
}

/// Admin console row with the applicant count computed at read time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminJobView {
    #[serde(flatten)]
    pub job: JobView,
    pub applications: Vec<ApplicationId>,
    pub applicant_count: usize,
}

impl AdminJobView {
    pub fn new(listing: JobListing, applicant_count: usize) -> Self {
        let (job, applications) = JobView::from_listing(listing);
        Self {
            job,
            applications,
            applicant_count,
        }
    }
}

/// Employer dashboard row: the job with its applications resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerJobView {
    #[serde(flatten)]
    pub job: JobView,
    pub applications: Vec<ApplicationView>,
}

impl EmployerJobView {
    pub fn new(listing: JobListing, applications: Vec<ApplicationView>) -> Self {
        let (job, _) = JobView::from_listing(listing);
        Self { job, applications }
    }
}
