//! # Postgres document store
//!
//! Users are plain rows. Each post is a single JSONB document so that
//! reactions and comments change together, the same way a document database
//! would hold them.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, error};
use uuid::Uuid;

use domains::{
    DomainError, DomainResult, PasswordHash, Post, PostEdit, PostId, PostRepository, User,
    UserId, UserRepository,
};

const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

/// Unique violations become `Conflict`; everything else is `Internal`.
fn db_err(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return DomainError::Conflict(
                db.constraint().unwrap_or("unique constraint").to_string(),
            );
        }
    }
    error!(error = %err, "database failure");
    DomainError::internal(err)
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: PasswordHash::new(row.try_get::<String, _>("password_hash")?),
        created_at: row.try_get("created_at")?,
    })
}

fn post_from_row(row: &PgRow) -> Result<Post, sqlx::Error> {
    Ok(row.try_get::<Json<Post>, _>("document")?.0)
}

#[async_trait]
impl UserRepository for PgStore {
    async fn insert(&self, user: User) -> DomainResult<User> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id.as_uuid())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.password_hash.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        debug!(user_id = %user.id, "user stored");
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(user_from_row).transpose().map_err(db_err)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(user_from_row).transpose().map_err(db_err)
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter()
            .map(user_from_row)
            .collect::<Result<_, _>>()
            .map_err(db_err)
    }

    async fn delete(&self, id: UserId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PostRepository for PgStore {
    async fn insert(&self, post: Post) -> DomainResult<Post> {
        sqlx::query("INSERT INTO posts (id, author_id, created_at, document) VALUES ($1, $2, $3, $4)")
            .bind(post.id.as_uuid())
            .bind(post.author().as_uuid())
            .bind(post.created_at)
            .bind(Json(&post))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let row = sqlx::query("SELECT document FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(post_from_row).transpose().map_err(db_err)
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        let rows = sqlx::query("SELECT document FROM posts ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter()
            .map(post_from_row)
            .collect::<Result<_, _>>()
            .map_err(db_err)
    }

    /// Row lock + rewrite in one transaction. Dropping `tx` early rolls back.
    async fn update(&self, id: PostId, edit: PostEdit) -> DomainResult<Post> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let row = sqlx::query("SELECT document FROM posts WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        let mut post = post_from_row(&row).map_err(db_err)?;
        edit(&mut post)?;

        sqlx::query("UPDATE posts SET document = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(Json(&post))
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> PgStore {
        let url = std::env::var("POSTBOARD_TEST_DATABASE_URL")
            .expect("POSTBOARD_TEST_DATABASE_URL must point at a scratch database");
        PgStore::connect(&url, 2).await.expect("Failed to init Postgres")
    }

    #[tokio::test]
    #[ignore = "needs a Postgres instance in POSTBOARD_TEST_DATABASE_URL"]
    async fn duplicate_email_is_a_conflict() {
        let store = store().await;
        let email = format!("{}@example.com", Uuid::now_v7());
        let user = || User::new("Alex".into(), email.clone(), PasswordHash::new("h"));

        UserRepository::insert(&store, user()).await.unwrap();
        let err = UserRepository::insert(&store, user()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    #[ignore = "needs a Postgres instance in POSTBOARD_TEST_DATABASE_URL"]
    async fn document_round_trips_through_update() {
        let store = store().await;
        let author = UserId::new();
        let post = PostRepository::insert(
            &store,
            Post::new(author, "Title".into(), "Body".into()),
        )
        .await
        .unwrap();

        let updated = store
            .update(
                post.id,
                Box::new(move |p: &mut Post| {
                    p.toggle_like(author);
                    p.add_comment(author, "first").map(|_| ())
                }),
            )
            .await
            .unwrap();

        let stored = PostRepository::find_by_id(&store, post.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.likes(), &[author]);
        assert_eq!(stored.comments().len(), 1);

        assert!(PostRepository::delete(&store, post.id).await.unwrap());
    }
}
