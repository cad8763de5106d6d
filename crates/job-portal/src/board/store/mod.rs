//! Storage seams shared by every board area, plus the in-memory backend the
//! service ships with.

mod memory;

use std::sync::Arc;

pub use memory::{InMemoryApplicationRepository, InMemoryJobRepository, InMemoryUserRepository};

use super::applications::ApplicationRepository;
use super::identity::UserRepository;
use super::jobs::JobRepository;

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Handles to the three collections.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            jobs: Arc::new(InMemoryJobRepository::default()),
            applications: Arc::new(InMemoryApplicationRepository::default()),
        }
    }
}
