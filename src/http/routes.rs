//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{download, health_check, version_check, video_info};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    // Build router
    let mut router = Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        // Fetch endpoints
        .route("/video_info", post(video_info))
        .route("/download", post(download))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state);

    if cors_enabled {
        // The frontend is a browser SPA on another origin; request bodies
        // are JSON, so CONTENT_TYPE has to survive preflight.
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
                .max_age(Duration::from_secs(3600)),
        );
    }

    router
}
