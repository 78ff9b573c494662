//! # Posts and the reaction state machine
//!
//! A post is one document: its likes, dislikes and comments live inside it
//! and are only ever changed through the methods below, so the invariants
//! hold no matter which store persists the document:
//!
//! - a user is in at most one of `likes` / `dislikes`,
//! - comment ids are unique and comments keep insertion order,
//! - `author` is fixed at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::ids::{CommentId, PostId, UserId};

/// A user's standing towards one post. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Neutral,
    Liked,
    Disliked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    author: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    likes: Vec<UserId>,
    #[serde(default)]
    dislikes: Vec<UserId>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl Post {
    /// Title and content are expected to be validated already.
    pub fn new(author: UserId, title: String, content: String) -> Self {
        Self {
            id: PostId::new(),
            title,
            content,
            author,
            created_at: Utc::now(),
            likes: Vec::new(),
            dislikes: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn likes(&self) -> &[UserId] {
        &self.likes
    }

    pub fn dislikes(&self) -> &[UserId] {
        &self.dislikes
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    pub fn reaction_of(&self, user: UserId) -> Reaction {
        if self.likes.contains(&user) {
            Reaction::Liked
        } else if self.dislikes.contains(&user) {
            Reaction::Disliked
        } else {
            Reaction::Neutral
        }
    }

    /// Liked -> Neutral, anything else -> Liked. Returns the new state.
    pub fn toggle_like(&mut self, user: UserId) -> Reaction {
        let next = match self.reaction_of(user) {
            Reaction::Liked => Reaction::Neutral,
            _ => Reaction::Liked,
        };
        self.set_reaction(user, next);
        next
    }

    /// Disliked -> Neutral, anything else -> Disliked. Returns the new state.
    pub fn toggle_dislike(&mut self, user: UserId) -> Reaction {
        let next = match self.reaction_of(user) {
            Reaction::Disliked => Reaction::Neutral,
            _ => Reaction::Disliked,
        };
        self.set_reaction(user, next);
        next
    }

    fn set_reaction(&mut self, user: UserId, reaction: Reaction) {
        self.likes.retain(|u| *u != user);
        self.dislikes.retain(|u| *u != user);
        match reaction {
            Reaction::Liked => self.likes.push(user),
            Reaction::Disliked => self.dislikes.push(user),
            Reaction::Neutral => {}
        }
    }

    /// Appends a comment. `text` is trimmed and must not end up empty.
    pub fn add_comment(&mut self, author: UserId, text: &str) -> DomainResult<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("Comment text is required".into()));
        }

        let mut id = CommentId::new();
        while self.comment(id).is_some() {
            id = CommentId::new();
        }

        self.comments.push(Comment {
            id,
            author,
            text: text.to_string(),
            created_at: Utc::now(),
        });
        let last = self.comments.len() - 1;
        Ok(&self.comments[last])
    }

    /// Removes one comment, leaving the rest in order. Only its author may;
    /// an anonymous caller (`None`) is never the author.
    pub fn remove_comment(
        &mut self,
        user: Option<UserId>,
        id: CommentId,
    ) -> DomainResult<Comment> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::not_found("Comment", id))?;

        if Some(self.comments[index].author) != user {
            return Err(DomainError::Forbidden(
                "Only the comment author can delete this comment".into(),
            ));
        }

        Ok(self.comments.remove(index))
    }

    pub fn ensure_author(&self, user: Option<UserId>) -> DomainResult<()> {
        if user == Some(self.author) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(
                "Only the post author can delete this post".into(),
            ))
        }
    }
}
