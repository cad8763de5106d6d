use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicationDetails, ApplicationId, ApplicationStatus};
use super::resume::PublicOrigin;
use crate::board::identity::UserProfile;
use crate::board::jobs::JobSummary;

/// Wire shape of an application. The resume is exposed only as an absolute
/// URL on the caller's own origin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserProfile>,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which populated references a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Populate {
    Job,
    Applicant,
    Both,
}

impl ApplicationView {
    pub fn build(details: ApplicationDetails, origin: &PublicOrigin, populate: Populate) -> Self {
        let ApplicationDetails {
            application,
            job,
            applicant,
        } = details;

        Self {
            resume_url: application.resume.as_ref().map(|key| origin.url_for(key)),
            id: application.id,
            job: job.filter(|_| populate != Populate::Applicant),
            applicant: applicant.filter(|_| populate != Populate::Job),
            cover_letter: application.cover_letter,
            status: application.status,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }

    pub fn list(
        details: Vec<ApplicationDetails>,
        origin: &PublicOrigin,
        populate: Populate,
    ) -> Vec<Self> {
        details
            .into_iter()
            .map(|details| Self::build(details, origin, populate))
            .collect()
    }
}
