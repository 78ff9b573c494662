//! Posts, reactions and comments.
//!
//! Every mutation of an existing post goes through `PostRepository::update`,
//! so the state machine in `domains::post` runs inside the store's atomic
//! read-modify-write and concurrent reactions never overwrite each other.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use domains::{
    CommentId, DomainError, DomainResult, Post, PostEdit, PostId, PostRepository, UserId,
    UserRepository,
};

use crate::validation::validate_post;

pub struct PostService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    #[instrument(skip(self, title, content))]
    pub async fn create_post(
        &self,
        user: Option<UserId>,
        title: Option<&str>,
        content: Option<&str>,
    ) -> DomainResult<Post> {
        let author = self.authenticate(user).await?;
        let (title, content) = validate_post(title, content)?;

        let post = self
            .posts
            .insert(Post::new(author, title.to_string(), content.to_string()))
            .await?;
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    pub async fn list_posts(&self) -> DomainResult<Vec<Post>> {
        self.posts.list().await
    }

    pub async fn get_post(&self, id: PostId) -> DomainResult<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    #[instrument(skip(self))]
    pub async fn toggle_like(&self, post: PostId, user: Option<UserId>) -> DomainResult<Post> {
        let user = self.authenticate(user).await?;
        self.edit(post, move |p| {
            let state = p.toggle_like(user);
            debug!(?state, "reaction changed");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn toggle_dislike(&self, post: PostId, user: Option<UserId>) -> DomainResult<Post> {
        let user = self.authenticate(user).await?;
        self.edit(post, move |p| {
            let state = p.toggle_dislike(user);
            debug!(?state, "reaction changed");
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, text))]
    pub async fn add_comment(
        &self,
        post: PostId,
        user: Option<UserId>,
        text: Option<&str>,
    ) -> DomainResult<Post> {
        let user = self.authenticate(user).await?;
        let text = text.unwrap_or_default().to_string();
        self.edit(post, move |p| p.add_comment(user, &text).map(|_| ()))
            .await
    }

    /// A missing post or comment is reported before ownership; an anonymous
    /// or unknown caller owns nothing and gets `Forbidden`.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        post: PostId,
        user: Option<UserId>,
        comment: CommentId,
    ) -> DomainResult<Post> {
        let user = self.known(user).await?;
        self.edit(post, move |p| p.remove_comment(user, comment).map(|_| ()))
            .await
    }

    /// Comments are embedded in the post, so they go with it. Ownership is
    /// checked the same way as in `delete_comment`.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post: PostId, user: Option<UserId>) -> DomainResult<()> {
        let user = self.known(user).await?;
        let existing = self.get_post(post).await?;
        existing.ensure_author(user)?;

        if !self.posts.delete(post).await? {
            return Err(DomainError::not_found("Post", post));
        }
        info!(post_id = %post, "post deleted");
        Ok(())
    }

    async fn edit<F>(&self, post: PostId, edit: F) -> DomainResult<Post>
    where
        F: FnOnce(&mut Post) -> DomainResult<()> + Send + 'static,
    {
        let edit: PostEdit = Box::new(edit);
        self.posts.update(post, edit).await
    }

    /// A caller is authenticated when it names an existing account.
    async fn authenticate(&self, user: Option<UserId>) -> DomainResult<UserId> {
        self.known(user).await?.ok_or(DomainError::Unauthenticated)
    }

    /// Drops ids that name no account.
    async fn known(&self, user: Option<UserId>) -> DomainResult<Option<UserId>> {
        let Some(id) = user else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(id).await?.map(|_| id))
    }
}
