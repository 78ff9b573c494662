use std::sync::Arc;

use domains::{PasswordHasher, PostRepository, UserRepository};
use services::{AccountService, PostService};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(users.clone(), hasher)),
            posts: Arc::new(PostService::new(users, posts)),
        }
    }
}
