//! # auth-adapters
//!
//! Argon2id implementation of `PasswordHasher`.
//! Cost parameters are fixed per instance; every hash gets a fresh random
//! salt. Hashing is CPU-bound, so both operations run on the blocking pool.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

use domains::{DomainError, DomainResult, PasswordHash, PasswordHasher};

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new(cost: HashCost) -> Result<Self, HasherError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(HasherError::Params)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

fn hash_blocking(argon2: &Argon2<'_>, password: &str) -> DomainResult<PasswordHash> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| PasswordHash::new(phc.to_string()))
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            DomainError::internal(format!("password hashing failed: {e}"))
        })
}

fn verify_blocking(argon2: &Argon2<'_>, password: &str, encoded: &str) -> DomainResult<bool> {
    let parsed = PhcHash::new(encoded).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        DomainError::internal(format!("invalid password hash format: {e}"))
    })?;

    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DomainError::internal(format!(
            "password verification failed: {e}"
        ))),
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> DomainResult<PasswordHash> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&argon2, &password))
            .await
            .map_err(DomainError::internal)?
    }

    /// Verification parameters come from the PHC string, not from `self`.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> DomainResult<bool> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&argon2, &password, &encoded))
            .await
            .map_err(DomainError::internal)?
    }
}
