use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub generation_model: String,
    /// Make.com (or any automation) webhook receiving published posts.
    /// Unset means every publish attempt ends in `error`.
    pub webhook_url: Option<String>,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_base_url: non_empty_var("OPENAI_BASE_URL"),
            generation_model: non_empty_var("GENERATION_MODEL")
                .unwrap_or_else(|| openai_client::DEFAULT_MODEL.to_string()),
            webhook_url: non_empty_var("MAKE_WEBHOOK_URL"),
            allowed_origins: non_empty_var("ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
