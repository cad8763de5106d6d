//! Accounts, password hashing and bearer tokens.

pub mod domain;
pub mod password;
pub mod repository;
pub mod router;
pub mod service;
pub mod token;

pub use domain::{Actor, Credentials, Registration, Role, Session, User, UserId, UserProfile};
pub use password::{Argon2Passwords, PasswordError};
pub use repository::UserRepository;
pub use router::auth_router;
pub use service::{AccountService, AccountServiceError};
pub use token::{Claims, TokenError, TokenIssuer};
