//! Administrator console.

pub mod router;
pub mod service;

pub use router::admin_router;
pub use service::{AdminService, AdminServiceError, JobOverview};
