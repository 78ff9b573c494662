//! Registration, login and account housekeeping.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use domains::{
    DomainError, DomainResult, PasswordHash, PasswordHasher, PublicUser, User, UserId,
    UserRepository,
};

use crate::validation::validate_credentials;

/// Hashed once and verified against when an email is unknown, so both
/// failed-login paths do the same amount of work.
const DECOY_PASSWORD: &str = "decoy-Password-1!";

/// Raw registration input. Fields are optional because the request body may
/// omit them; the validator decides what is missing.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    decoy: OnceCell<PasswordHash>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users,
            hasher,
            decoy: OnceCell::new(),
        }
    }

    /// Computes the decoy hash up front so the first unknown-email login does
    /// not also pay for hashing. Call once at startup.
    pub async fn prepare(&self) -> DomainResult<()> {
        self.decoy_hash().await.map(|_| ())
    }

    #[instrument(skip_all)]
    pub async fn register(&self, input: RegisterInput) -> DomainResult<PublicUser> {
        validate_credentials(
            input.name.as_deref(),
            input.email.as_deref(),
            input.password.as_deref(),
        )?;

        // Validated above; all three are present.
        let (Some(name), Some(email), Some(password)) = (input.name, input.email, input.password)
        else {
            return Err(DomainError::Validation("Missing registration fields".into()));
        };

        let hash = self.hasher.hash(&password).await?;
        let user = User::new(name, email, hash);

        let stored = self.users.insert(user).await.map_err(|err| match err {
            DomainError::Conflict(_) => {
                DomainError::Conflict("Email already registered".into())
            }
            other => other,
        })?;

        info!(user_id = %stored.id, "account registered");
        Ok(stored.to_public())
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<PublicUser> {
        let Some(user) = self.users.find_by_email(email).await? else {
            let decoy = self.decoy_hash().await?;
            let _ = self.hasher.verify(password, decoy).await?;
            warn!("login rejected");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!("login rejected");
            return Err(DomainError::InvalidCredentials);
        }

        info!(user_id = %user.id, "login succeeded");
        Ok(user.to_public())
    }

    pub async fn list(&self) -> DomainResult<Vec<PublicUser>> {
        let users = self.users.list().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }

    pub async fn get(&self, id: UserId) -> DomainResult<PublicUser> {
        self.users
            .find_by_id(id)
            .await?
            .map(|u| u.to_public())
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Idempotent: deleting an unknown id is not an error.
    pub async fn delete(&self, id: UserId) -> DomainResult<()> {
        if self.users.delete(id).await? {
            info!(user_id = %id, "account deleted");
        }
        Ok(())
    }

    async fn decoy_hash(&self) -> DomainResult<&PasswordHash> {
        self.decoy
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
    }
}
