//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /promo/{id}`  - Promo link redirect (public)
//! - `GET  /health`      - Health check (public)
//! - `/api/track/*`      - Click and conversion tracking (public)
//! - `/api/*`            - Dashboard API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer access token on `/api/*` except tracking
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::rate_limit::{self, Tier};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, Some(behind_proxy)))
}

/// Same routes and middleware as [`app_router`] minus rate limiting and
/// path normalization.
///
/// Used by the HTTP tests, which run without a peer socket address.
pub fn router_without_rate_limit(state: AppState) -> Router {
    build(state, None)
}

fn build(state: AppState, rate_limit: Option<bool>) -> Router {
    let limited = |router: Router<AppState>, tier: Tier| match rate_limit {
        Some(behind_proxy) => rate_limit::apply(router, tier, behind_proxy),
        None => router,
    };

    let public = Router::new()
        .route("/promo/{id}", get(redirect_handler))
        .route("/health", get(health_handler));

    let api_router = limited(api::routes::public_routes(), Tier::Public).merge(limited(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        Tier::Api,
    ));

    Router::new()
        .merge(limited(public, Tier::Public))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
