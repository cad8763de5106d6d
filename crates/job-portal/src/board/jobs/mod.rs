//! Job postings owned by employers.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

pub use domain::{Job, JobChanges, JobDraft, JobId, JobListing, JobSummary};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::{EmployerJob, JobService, JobServiceError};
pub use views::{AdminJobView, EmployerJobView, JobView, PostedJobView};
