//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    content_and_previews_handler, content_handler, draft_handler, health_handler,
    make_webhook_handler, previews_handler, publish_handler, webhook_status_handler,
};

/// Inline image uploads travel inside the form body.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// `allowed_origins` empty means any origin may call the API.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let app_state = AxumAppState {
        deps: Arc::new(deps),
    };

    let cors = CorsLayer::new()
        .allow_origin(cors_origins(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        // Form actions
        .route("/actions/draft", post(draft_handler))
        .route("/actions/content", post(content_handler))
        .route("/actions/previews", post(previews_handler))
        .route(
            "/actions/content-and-previews",
            post(content_and_previews_handler),
        )
        .route("/actions/publish", post(publish_handler))
        // Webhook utilities
        .route("/api/webhook-status", get(webhook_status_handler))
        .route("/api/make-webhook", post(make_webhook_handler))
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_origins(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.is_empty() {
        return Any.into();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}
