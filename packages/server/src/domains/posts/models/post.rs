use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{PostId, Tone};

/// A submitted post and its publishing status.
///
/// Created once with status `draft`, then moved exactly once to `published`
/// or `error`. Never edited or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub content: PostContent,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the author submits. Validated before it reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostContent {
    pub idea: Option<String>,
    pub tone: Tone,
    pub category: Option<Category>,
    pub post_type: PostType,
    pub title: String,

    // Body segments
    pub value_proposition: String,
    pub problem_solution: String,
    pub backstory: Option<String>,
    pub local_connection: Option<String>,
    pub call_to_action: Option<String>,

    /// Final body sent downstream.
    pub base_text: String,
    /// Remote URL or inline `data:` URI.
    pub image_url: Option<String>,

    // Product posts only
    pub product_name: Option<String>,
    pub price: Option<String>,
    pub product_description: Option<String>,
}

// =============================================================================
// Enums for type-safe edges
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_type", rename_all = "snake_case")]
pub enum PostType {
    #[default]
    #[serde(alias = "articulo")]
    Article,
    #[serde(alias = "producto")]
    Product,
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostType::Article => write!(f, "article"),
            PostType::Product => write!(f, "product"),
        }
    }
}

impl std::str::FromStr for PostType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "article" | "articulo" | "artículo" => Ok(PostType::Article),
            "product" | "producto" => Ok(PostType::Product),
            _ => Err(anyhow::anyhow!("Invalid post type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_category", rename_all = "snake_case")]
pub enum Category {
    Tourism,
    Gastronomy,
    CultureAndArt,
    Sports,
    Heritage,
    Personalities,
    Entrepreneurship,
    Local,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Tourism => write!(f, "tourism"),
            Category::Gastronomy => write!(f, "gastronomy"),
            Category::CultureAndArt => write!(f, "culture_and_art"),
            Category::Sports => write!(f, "sports"),
            Category::Heritage => write!(f, "heritage"),
            Category::Personalities => write!(f, "personalities"),
            Category::Entrepreneurship => write!(f, "entrepreneurship"),
            Category::Local => write!(f, "local"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    /// Accepts the legacy option labels too, emoji prefix included ("🏖 Turismo").
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim_start_matches(|c: char| !c.is_alphabetic()).trim();
        match name.to_lowercase().as_str() {
            "tourism" | "turismo" => Ok(Category::Tourism),
            "gastronomy" | "gastronomía" | "gastronomia" => Ok(Category::Gastronomy),
            "culture_and_art" | "cultura y arte" => Ok(Category::CultureAndArt),
            "sports" | "deportes" => Ok(Category::Sports),
            "heritage" | "patrimonio" => Ok(Category::Heritage),
            "personalities" | "personajes" => Ok(Category::Personalities),
            "entrepreneurship" | "emprende" => Ok(Category::Entrepreneurship),
            "local" | "tacna" => Ok(Category::Local),
            _ => Err(anyhow::anyhow!("Invalid category: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_status", rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
    /// Reserved for future scheduling; nothing produces it yet.
    Scheduled,
    Error,
}

impl PostStatus {
    /// Only `draft -> published` and `draft -> error` exist.
    pub fn can_transition_to(self, next: PostStatus) -> bool {
        matches!(
            (self, next),
            (PostStatus::Draft, PostStatus::Published) | (PostStatus::Draft, PostStatus::Error)
        )
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Draft => write!(f, "draft"),
            PostStatus::Published => write!(f, "published"),
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "scheduled" => Ok(PostStatus::Scheduled),
            "error" => Ok(PostStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid post status: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Post {
    /// Insert a new post with status `draft`.
    pub async fn create(id: PostId, content: &PostContent, pool: &PgPool) -> Result<Self> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (
                id,
                idea,
                tone,
                category,
                post_type,
                title,
                value_proposition,
                problem_solution,
                backstory,
                local_connection,
                call_to_action,
                base_text,
                image_url,
                product_name,
                price,
                product_description,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, 'draft')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&content.idea)
        .bind(content.tone)
        .bind(content.category)
        .bind(content.post_type)
        .bind(&content.title)
        .bind(&content.value_proposition)
        .bind(&content.problem_solution)
        .bind(&content.backstory)
        .bind(&content.local_connection)
        .bind(&content.call_to_action)
        .bind(&content.base_text)
        .bind(&content.image_url)
        .bind(&content.product_name)
        .bind(&content.price)
        .bind(&content.product_description)
        .fetch_one(pool)
        .await
        .context("Failed to insert post")?;
        Ok(post)
    }

    /// Move a draft to its terminal status.
    ///
    /// The `status = 'draft'` guard makes a second update fail instead of
    /// silently rewriting a terminal record.
    pub async fn update_status(id: PostId, status: PostStatus, pool: &PgPool) -> Result<Self> {
        if !PostStatus::Draft.can_transition_to(status) {
            anyhow::bail!("Invalid post status transition: draft -> {}", status);
        }

        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = 'draft'
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to update post status")?;

        post.ok_or_else(|| anyhow::anyhow!("Post {} not found or no longer a draft", id))
    }

    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }
}
