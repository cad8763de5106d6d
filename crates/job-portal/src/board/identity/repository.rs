use super::domain::{User, UserId};
use crate::board::store::RepositoryError;

/// Storage abstraction for accounts. Emails are unique.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn list(&self) -> Result<Vec<User>, RepositoryError>;
    fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
}
