//! Axum router configuration with middleware.
//!
//! JSON routes live under `/api/`. Middleware: CORS (any origin), tracing.
//!
//! When `server.web_dir` exists on disk, its files are served as the
//! fallback so the landing page loads from `/`. API routes and `/health`
//! take priority.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.server.web_dir.clone();

    let api_routes = Router::new()
        .route(
            "/generate-response",
            post(handlers::conversation::generate_response),
        )
        .route(
            "/conversation-report",
            post(handlers::conversation::conversation_report),
        )
        .route("/sessions", get(handlers::session::list_sessions))
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::clear_session),
        );

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if Path::new(&web_dir).is_dir() {
        let index_path = Path::new(&web_dir).join("index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "static file serving enabled");
    } else {
        tracing::debug!(path = %web_dir, "web directory not found, serving API only");
    }

    router
}

/// GET /health - Liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
