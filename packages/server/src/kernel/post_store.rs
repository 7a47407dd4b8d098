// Postgres-backed post store.
//
// Thin adapter: the SQL lives on the model (domains/posts/models).

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::PostId;
use crate::domains::posts::models::{Post, PostContent, PostStatus};

use super::BasePostStore;

#[derive(Clone)]
pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePostStore for PostgresPostStore {
    async fn create(&self, content: &PostContent) -> Result<Post> {
        Post::create(PostId::new(), content, &self.pool).await
    }

    async fn update_status(&self, id: PostId, status: PostStatus) -> Result<Post> {
        Post::update_status(id, status, &self.pool).await
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>> {
        Post::find_by_id(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }
}
