// Main entry point for the MultiPost API server

use std::sync::Arc;

use anyhow::{Context, Result};
use multipost_core::kernel::{HttpWebhook, OpenAIGenerator, PostgresPostStore, ServerDeps};
use multipost_core::{server::build_app, Config};
use openai_client::OpenAIClient;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,multipost_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MultiPost API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        model = %config.generation_model,
        webhook_configured = config.webhook_url.is_some(),
        "Configuration loaded"
    );
    if config.webhook_url.is_none() {
        tracing::warn!("MAKE_WEBHOOK_URL is not set; published posts will be marked as error");
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire infrastructure
    let mut openai = OpenAIClient::new(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        openai = openai.with_base_url(base_url.clone());
    }

    let deps = ServerDeps::new(
        Arc::new(OpenAIGenerator::new(
            Arc::new(openai),
            config.generation_model.clone(),
        )),
        Arc::new(PostgresPostStore::new(pool)),
        Arc::new(HttpWebhook::new(config.webhook_url.clone())),
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
