use async_trait::async_trait;
use sqlx::PgPool;

use super::{ContactRepository, PostRepository, Store};
use crate::models::{ContactMessage, NewPost, Post, PostPayload};

/// Postgres-backed repositories. Every method issues exactly one statement.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgStore {
    async fn insert_post(&self, post: &NewPost) -> Result<Post, sqlx::Error> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, description, content, cover_photo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.content)
        .bind(&post.cover_photo)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created post record: id={}", created.id);
        Ok(created)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_post(&self, id: i32, changes: &PostPayload) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, description = $2, content = $3
            WHERE id = $4
            "#,
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.content)
        .bind(id)
        .execute(&self.pool)
        .await?;

        tracing::info!("Updated post {}: rows_affected={}", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Deleted post {}: rows_affected={}", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ContactRepository for PgStore {
    async fn insert_contact(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, sqlx::Error> {
        let contact = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_me (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created contact message: id={}", contact.id);
        Ok(contact)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
