use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::board::applications::ApplicationId;
use crate::board::identity::{UserId, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A posting owned by the employer that created it.
///
/// `applications` mirrors the ids appended at submission time. It is a
/// convenience copy only: listings derive membership from `Application::job`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub created_by: UserId,
    pub applications: Vec<ApplicationId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
        }
    }
}

/// Job fields attached to application views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    #[serde(rename = "_id")]
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
}

/// A job together with its creator's public identity, `None` once the creator is gone.
#[derive(Debug, Clone)]
pub struct JobListing {
    pub job: Job,
    pub creator: Option<UserProfile>,
}

/// Create payload. Required fields stay optional so their absence is a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary: Option<String>,
}

/// Update payload merged over the stored job; absent keys leave fields untouched.
///
/// `salary` distinguishes "not sent" (`None`) from "cleared" (`Some(None)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_salary_change")]
    pub salary: Option<Option<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SalaryInput {
    Text(String),
    Number(serde_json::Number),
}

impl SalaryInput {
    fn normalize(self) -> Option<String> {
        let value = match self {
            SalaryInput::Text(text) => text.trim().to_string(),
            SalaryInput::Number(number) => number.to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

fn deserialize_salary<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<SalaryInput>::deserialize(deserializer)?;
    Ok(raw.and_then(SalaryInput::normalize))
}

fn deserialize_salary_change<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_salary(deserializer).map(Some)
}
