//! # DomainError
//!
//! Centralized error handling for the postboard workspace.
//! Adapters translate their backend failures into these variants; the HTTP
//! layer maps each variant to exactly one status code.

use thiserror::Error;

/// Message returned for every failed login, whichever check failed.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input the caller can correct (e.g. weak password, short title)
    #[error("{0}")]
    Validation(String),

    /// Login failed. Deliberately says nothing about which check failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No usable user identifier was supplied with the request
    #[error("authentication required")]
    Unauthenticated,

    /// The caller is known but may not touch this resource
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found (e.g. Post, Comment, User)
    #[error("{entity} not found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique field already taken (e.g. duplicate email)
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (store down, hashing failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for postboard logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
