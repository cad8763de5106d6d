use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<password_hash::Error> for PasswordError {
    fn from(value: password_hash::Error) -> Self {
        Self::Hash(value.to_string())
    }
}

/// Argon2id hashing with PHC-string output.
#[derive(Debug, Clone)]
pub struct Argon2Passwords {
    params: Params,
}

impl Default for Argon2Passwords {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2Passwords {
    /// Custom cost settings; memory is in KiB.
    pub fn with_cost(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|err| PasswordError::Params(err.to_string()))?;
        Ok(Self { params })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.hasher().hash_password(plain.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash)?;
        match self.hasher().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
