//! Job applications: submission with optional resume upload, employer review,
//! and resume delivery.

pub mod domain;
pub mod repository;
pub mod resume;
pub mod router;
pub mod service;
pub mod views;

pub use domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, JobApplications,
    ResumeFile, StatusChange, Submission,
};
pub use repository::{populate, ApplicationRepository};
pub use resume::{
    DiskResumeStore, PublicOrigin, ResumeError, ResumeKey, ResumeStore, ResumeUpload,
};
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError};
pub use views::{ApplicationView, Populate};
