use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    normalize_email, Actor, Credentials, Registration, Role, Session, User, UserId, UserProfile,
};
use super::password::{Argon2Passwords, PasswordError};
use super::repository::UserRepository;
use super::token::{TokenError, TokenIssuer};
use crate::board::store::RepositoryError;

/// Registration, login and bearer-token authentication.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Argon2Passwords,
    tokens: TokenIssuer,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Argon2Passwords,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a jobseeker or employer account and sign it in.
    pub fn register(&self, registration: Registration) -> Result<Session, AccountServiceError> {
        let name = required(registration.name)?;
        let email = normalize_email(&required(registration.email)?);
        let password = registration
            .password
            .filter(|password| !password.is_empty())
            .ok_or(AccountServiceError::MissingFields)?;

        let role = match registration.role.as_deref().map(str::trim) {
            None | Some("") => Role::Jobseeker,
            Some(raw) => match Role::parse(raw) {
                Some(Role::Admin) | None => return Err(AccountServiceError::InvalidRole),
                Some(role) => role,
            },
        };

        let user = self.create_user(name, email, &password, role)?;
        info!(user_id = %user.id, role = %user.role, "account registered");
        self.session_for(&user)
    }

    pub fn login(&self, credentials: Credentials) -> Result<Session, AccountServiceError> {
        let email = credentials
            .email
            .map(|email| normalize_email(&email))
            .filter(|email| !email.is_empty())
            .ok_or(AccountServiceError::InvalidCredentials)?;
        let password = credentials
            .password
            .ok_or(AccountServiceError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AccountServiceError::InvalidCredentials)?;
        if !self.passwords.verify(&password, &user.password_hash)? {
            debug!(user_id = %user.id, "password mismatch");
            return Err(AccountServiceError::InvalidCredentials);
        }

        self.session_for(&user)
    }

    /// Resolve a bearer token to the account it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<Actor, AccountServiceError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(AccountServiceError::Rejected)?;
        let user = self
            .users
            .fetch(&claims.user_id())?
            .ok_or(AccountServiceError::UnknownAccount)?;
        Ok(user.actor())
    }

    pub fn profile(&self, actor: &Actor) -> Result<UserProfile, AccountServiceError> {
        let user = self
            .users
            .fetch(&actor.id)?
            .ok_or(AccountServiceError::UnknownAccount)?;
        Ok(user.profile())
    }

    /// Provision an administrator unless the email is already registered.
    /// Returns whether a new account was created.
    pub fn ensure_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AccountServiceError> {
        let email = normalize_email(email);
        if let Some(existing) = self.users.find_by_email(&email)? {
            if existing.role != Role::Admin {
                return Err(AccountServiceError::EmailTaken);
            }
            return Ok(false);
        }

        let user = self.create_user(name.trim().to_string(), email, password, Role::Admin)?;
        info!(user_id = %user.id, "bootstrap administrator created");
        Ok(true)
    }

    fn create_user(
        &self,
        name: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<User, AccountServiceError> {
        if self.users.find_by_email(&email)?.is_some() {
            return Err(AccountServiceError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            name,
            email,
            password_hash: self.passwords.hash(password)?,
            role,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(user).map_err(|err| match err {
            RepositoryError::Conflict => AccountServiceError::EmailTaken,
            other => other.into(),
        })
    }

    fn session_for(&self, user: &User) -> Result<Session, AccountServiceError> {
        Ok(Session {
            token: self.tokens.issue(user)?,
            user: user.profile(),
        })
    }
}

fn required(value: Option<String>) -> Result<String, AccountServiceError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(AccountServiceError::MissingFields)
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid role")]
    InvalidRole,
    #[error("User already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("token rejected: {0}")]
    Rejected(#[source] TokenError),
    #[error("account no longer exists")]
    UnknownAccount,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
