//! In-process store backed by `DashMap`.
//!
//! Each instance owns its maps; nothing is global, so every test builds its
//! own store. Post updates run while holding the entry's shard lock, which
//! makes `update` an atomic read-modify-write per post.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use domains::{
    DomainError, DomainResult, Post, PostEdit, PostId, PostRepository, User, UserId,
    UserRepository,
};

#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    /// Unique index: email -> owner.
    emails: DashMap<String, UserId>,
    posts: DashMap<PostId, Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: User) -> DomainResult<User> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict("duplicate key: email".into())),
            Entry::Vacant(slot) => {
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                debug!(user_id = %user.id, "user stored");
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let id = self.emails.get(email).map(|e| *e.value());
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.value().clone())))
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn delete(&self, id: UserId) -> DomainResult<bool> {
        let Some((_, user)) = self.users.remove(&id) else {
            return Ok(false);
        };
        self.emails.remove_if(&user.email, |_, owner| *owner == id);
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, post: Post) -> DomainResult<Post> {
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.value().clone()))
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn update(&self, id: PostId, edit: PostEdit) -> DomainResult<Post> {
        let mut entry = self
            .posts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        // Work on a copy so a failed edit leaves the stored post untouched.
        let mut draft = entry.value().clone();
        edit(&mut draft)?;
        *entry.value_mut() = draft.clone();
        Ok(draft)
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        Ok(self.posts.remove(&id).is_some())
    }
}
