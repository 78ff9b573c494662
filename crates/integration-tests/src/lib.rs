//! Shared fixtures for the cross-crate tests.
//!
//! Every helper builds a fresh `MemoryStore`, so tests never share state.

use std::sync::Arc;

use auth_adapters::{Argon2Hasher, HashCost};
use domains::PostId;
use services::{AccountService, PostService, RegisterInput};
use storage_adapters::MemoryStore;

#[cfg(feature = "web-axum")]
pub mod http;

pub const STRONG_PASSWORD: &str = "StrongPassword123!";

/// Real Argon2id with the smallest legal cost, to keep tests fast.
pub fn cheap_hasher() -> Arc<Argon2Hasher> {
    Arc::new(
        Argon2Hasher::new(HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("valid test parameters"),
    )
}

pub struct Services {
    pub store: Arc<MemoryStore>,
    pub accounts: AccountService,
    pub posts: PostService,
}

pub fn services() -> Services {
    let store = Arc::new(MemoryStore::new());
    Services {
        accounts: AccountService::new(store.clone(), cheap_hasher()),
        posts: PostService::new(store.clone(), store.clone()),
        store,
    }
}

pub fn registration(name: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        name: Some(name.into()),
        email: Some(email.into()),
        password: Some(password.into()),
    }
}

impl Services {
    /// Registers `name` with a derived email and returns the id.
    pub async fn user(&self, name: &str) -> domains::UserId {
        let email = format!("{}@example.com", name.to_lowercase());
        self.accounts
            .register(registration(name, &email, STRONG_PASSWORD))
            .await
            .expect("registration succeeds")
            .id
    }

    pub async fn post_by(&self, author: domains::UserId) -> PostId {
        self.posts
            .create_post(Some(author), Some("Hello world"), Some("First post"))
            .await
            .expect("post is created")
            .id
    }
}
