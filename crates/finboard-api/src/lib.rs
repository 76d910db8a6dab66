//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: dashboard page, per-view filter and pagination

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use finboard_config::Config;
use finboard_core::{spawn_idle_sweeper, ViewRegistry};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ViewRegistry>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_view_dispose, htmx_view, htmx_view_filter, htmx_view_next, htmx_view_previous,
        page_dashboard,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // HTMX page routes
        .route("/", get(page_dashboard))
        // HTMX partial routes
        .route("/views/:id", get(htmx_view))
        .route("/views/:id/filter", post(htmx_view_filter))
        .route("/views/:id/next", post(htmx_view_next))
        .route("/views/:id/previous", post(htmx_view_previous))
        .route("/views/:id/dispose", post(api_view_dispose))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <script>
        // htmx drops 4xx bodies by default; show the error banner instead
        document.addEventListener('htmx:beforeSwap', function (event) {{
            if (event.detail.xhr.status === 400) {{
                event.detail.shouldSwap = true;
                event.detail.isError = false;
            }}
        }});
    </script>
</head>
<body class="bg-gray-100 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Serve the dashboard until Ctrl-C
pub async fn start_server(config: Config, registry: Arc<ViewRegistry>) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let shutdown = Arc::new(Notify::new());
    let sweeper = spawn_idle_sweeper(
        registry.clone(),
        config.session.sweep_interval(),
        config.session.idle_timeout(),
        shutdown.clone(),
    );

    let state = AppState { registry, config };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting finboard server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Transactions dashboard)");
    log::info!("  - /views/:id (View fragment, filter, next, previous, dispose)");
    log::info!("  - /health (Health check)");

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await;

    shutdown.notify_one();
    let _ = sweeper.await;

    match result {
        Ok(()) => {
            log::info!("Server stopped gracefully");
            Ok(())
        }
        Err(e) => {
            log::error!("Server error: {}", e);
            Err(e.into())
        }
    }
}
