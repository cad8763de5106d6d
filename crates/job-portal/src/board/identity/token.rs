use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::domain::{Role, User, UserId};

/// Signed token body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId(self.sub.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signing key rejected")]
    InvalidKey,
    #[error("token could not be signed: {0}")]
    Signing(String),
    #[error("token rejected: {0}")]
    Invalid(String),
    #[error("token expired")]
    Expired,
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    key: Hmac<Sha256>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, TokenError> {
        let key = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .map_err(|_| TokenError::InvalidKey)?;
        Ok(Self {
            key,
            ttl: Duration::hours(ttl_hours),
        })
    }

    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now())
    }

    pub(crate) fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id.0.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        claims
            .sign_with_key(&self.key)
            .map_err(|err| TokenError::Signing(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims: Claims = token
            .verify_with_key(&self.key)
            .map_err(|err| TokenError::Invalid(err.to_string()))?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: UserId("user-7".to_string()),
            name: "Lin".to_string(),
            email: "lin@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Employer,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_tokens_verify() {
        let issuer = TokenIssuer::new("secret", 1).expect("issuer");
        let token = issuer.issue(&user()).expect("signs");
        let claims = issuer.verify(&token).expect("verifies");
        assert_eq!(claims.user_id(), UserId("user-7".to_string()));
        assert_eq!(claims.role, Role::Employer);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let issuer = TokenIssuer::new("secret", 1).expect("issuer");
        let other = TokenIssuer::new("other", 1).expect("issuer");
        let token = other.issue(&user()).expect("signs");
        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let issuer = TokenIssuer::new("secret", 1).expect("issuer");
        let token = issuer
            .issue_at(&user(), Utc::now() - Duration::hours(2))
            .expect("signs");
        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = TokenIssuer::new("secret", 1).expect("issuer");
        assert!(issuer.verify("not.a.token").is_err());
    }
}
