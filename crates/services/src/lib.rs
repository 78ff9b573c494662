//! # services
//!
//! Application logic on top of the domain ports: input validation, accounts
//! and the post reaction/comment workflow. Storage and hashing are injected.

pub mod account;
pub mod posts;
pub mod validation;

pub use account::{AccountService, RegisterInput};
pub use posts::PostService;
pub use validation::{
    password_violations, validate_credentials, validate_post, CredentialError, PasswordRule,
};
