use crate::config::RateLimitConfig;
use crate::middleware::ClientIpKeyExtractor;
use axum::middleware;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};

use super::admin_handlers;
use super::health;
use super::link_handlers;
use super::AppState;

/// Create application router
pub fn create_router(
    state: Arc<AppState>,
    allowed_origins: Vec<String>,
    rate_limit_config: RateLimitConfig,
) -> axum::Router {
    use crate::middleware::{request_context_middleware, request_id_middleware};

    // Configure rate limiting for state-changing endpoints
    let governor_layer_strict = GovernorLayer::new(
        tower_governor::governor::GovernorConfigBuilder::default()
            .per_millisecond(60000 / rate_limit_config.requests_per_minute)
            .burst_size(rate_limit_config.burst_size)
            .key_extractor(ClientIpKeyExtractor)
            .finish()
            .expect("Failed to build strict governor config"),
    );

    // More lenient limits for redirect traffic
    let governor_layer_lenient = GovernorLayer::new(
        tower_governor::governor::GovernorConfigBuilder::default()
            .per_millisecond(60000 / (rate_limit_config.requests_per_minute * 2))
            .burst_size(rate_limit_config.burst_size * 2)
            .key_extractor(ClientIpKeyExtractor)
            .finish()
            .expect("Failed to build lenient governor config"),
    );

    // Configure CORS with specific origins
    let cors = if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| s.parse::<http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Strict rate limit for creation and admin operations
    let sensitive_routes = axum::Router::new()
        .route("/", post(link_handlers::create_link))
        .route("/admin/{secret_key}", get(admin_handlers::get_link))
        .route("/admin/{secret_key}", delete(admin_handlers::delete_link))
        .layer(governor_layer_strict);

    // Lenient rate limit for public redirects
    let public_routes = axum::Router::new()
        .route("/{key}", get(link_handlers::resolve_link))
        .layer(governor_layer_lenient);

    // Health check endpoint (no rate limiting)
    let health_routes = axum::Router::new().route("/_health", get(health::health_check));

    // Merge routers and apply middleware layers
    sensitive_routes
        .merge(public_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(request_context_middleware))
        .with_state(state)
}
