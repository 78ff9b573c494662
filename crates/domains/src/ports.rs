//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;

use crate::error::DomainResult;
use crate::ids::{PostId, UserId};
use crate::post::Post;
use crate::user::{PasswordHash, User};

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

/// An edit applied to one post document inside the store's atomic update.
/// Returning an error aborts the update and leaves the document untouched.
pub type PostEdit = Box<dyn FnOnce(&mut Post) -> DomainResult<()> + Send>;

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user. A taken email must surface as `DomainError::Conflict`.
    async fn insert(&self, user: User) -> DomainResult<User>;
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(&self) -> DomainResult<Vec<User>>;
    /// Returns whether a user was removed.
    async fn delete(&self, id: UserId) -> DomainResult<bool>;
}

/// Persistence contract for posts (comments and reactions are embedded).
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> DomainResult<Post>;
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    /// All posts, oldest first.
    async fn list(&self) -> DomainResult<Vec<Post>>;
    /// Atomic read-modify-write of one post. `NotFound` if the post is absent.
    async fn update(&self, id: PostId, edit: PostEdit) -> DomainResult<Post>;
    /// Returns whether a post was removed.
    async fn delete(&self, id: PostId) -> DomainResult<bool>;
}

/// One-way password hashing.
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hashes with a fresh random salt on every call.
    async fn hash(&self, password: &str) -> DomainResult<PasswordHash>;
    /// `Ok(false)` on mismatch; `Err` only when the hash itself is unusable.
    async fn verify(&self, password: &str, hash: &PasswordHash) -> DomainResult<bool>;
}
