pub mod repository;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{ContactMessage, NewPost, Post, PostPayload};

pub use repository::PgStore;

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return the stored row with its generated id
    async fn insert_post(&self, post: &NewPost) -> Result<Post, sqlx::Error>;

    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error>;

    async fn find_post(&self, id: i32) -> Result<Option<Post>, sqlx::Error>;

    /// Overwrite the text fields of a post, keeping its cover photo.
    /// Returns `false` when no row matched `id`.
    async fn update_post(&self, id: i32, changes: &PostPayload) -> Result<bool, sqlx::Error>;

    /// Returns `false` when no row matched `id`
    async fn delete_post(&self, id: i32) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, sqlx::Error>;
}

/// Everything the handlers need from the database
#[async_trait]
pub trait Store: PostRepository + ContactRepository {
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}
