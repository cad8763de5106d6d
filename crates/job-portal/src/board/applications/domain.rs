use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resume::{ResumeKey, ResumeUpload};
use crate::board::identity::{UserId, UserProfile};
use crate::board::jobs::{JobId, JobSummary};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review status. Any value may replace any other; there is no transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Exact, case-sensitive match against the four labels.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == raw)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One submission per (job, applicant) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub job: JobId,
    pub applicant: UserId,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeKey>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An application with its job and applicant resolved. Either side is `None`
/// when the referenced record has been deleted.
#[derive(Debug, Clone)]
pub struct ApplicationDetails {
    pub application: Application,
    pub job: Option<JobSummary>,
    pub applicant: Option<UserProfile>,
}

/// Applications received for one job, as shown to its employer.
#[derive(Debug, Clone)]
pub struct JobApplications {
    pub job_title: String,
    pub applications: Vec<ApplicationDetails>,
}

/// Parsed multipart submission.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub job_id: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeUpload>,
}

/// Body of a status change. Any JSON value is accepted so that numbers,
/// booleans and unknown labels all fail the same way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusChange {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

impl StatusChange {
    pub fn label(&self) -> Option<&str> {
        self.status.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Bytes of a stored resume ready to be sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_exact() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.label()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("Accepted"), None);
        assert_eq!(ApplicationStatus::parse("hired"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn only_string_statuses_carry_a_label() {
        let change: StatusChange =
            serde_json::from_str(r#"{"status":"reviewed"}"#).expect("string status");
        assert_eq!(change.label(), Some("reviewed"));

        for body in [r#"{"status":5}"#, r#"{"status":true}"#, r#"{"status":null}"#, "{}"] {
            let change: StatusChange = serde_json::from_str(body).expect("any value parses");
            assert_eq!(change.label(), None, "{body}");
        }
    }

    #[test]
    fn default_status_is_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
