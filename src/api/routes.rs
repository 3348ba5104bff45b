//! API route configuration.

use crate::api::handlers::{
    admin_links_handler, admin_partners_handler, admin_stats_handler, admin_update_link_handler,
    admin_update_partner_handler, create_link_handler, list_links_handler, me_handler,
    register_handler, stats_handler, track_click_handler, track_conversion_handler,
    update_link_handler, update_me_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Unauthenticated tracking endpoints, called from landing pages.
///
/// # Endpoints
///
/// - `POST /track/click`      - Record a click for a link
/// - `POST /track/conversion` - Record a sign-up or purchase
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/track/click", post(track_click_handler))
        .route("/track/conversion", post(track_conversion_handler))
}

/// Routes that require a verified bearer token.
///
/// Every route except `/partners/register` additionally resolves the token
/// to an active partner through the `Caller` extractor.
///
/// # Endpoints
///
/// - `POST  /partners/register`      - Create the caller's partner profile
/// - `GET   /me`                     - Caller's profile
/// - `PATCH /me`                     - Rename the caller's profile
/// - `GET   /links`                  - Caller's links
/// - `POST  /links`                  - Create a link
/// - `PATCH /links`                  - Toggle one of the caller's links
/// - `GET   /stats`                  - Link or partner statistics
/// - `GET   /admin/partners`         - All partners (admin)
/// - `PATCH /admin/partners/{id}`    - Toggle a partner (admin)
/// - `GET   /admin/links`            - All links (admin)
/// - `PATCH /admin/links/{id}`       - Toggle any link (admin)
/// - `GET   /admin/stats`            - Global totals (admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/partners/register", post(register_handler))
        .route("/me", get(me_handler).patch(update_me_handler))
        .route(
            "/links",
            get(list_links_handler)
                .post(create_link_handler)
                .patch(update_link_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/admin/partners", get(admin_partners_handler))
        .route("/admin/partners/{id}", patch(admin_update_partner_handler))
        .route("/admin/links", get(admin_links_handler))
        .route("/admin/links/{id}", patch(admin_update_link_handler))
        .route("/admin/stats", get(admin_stats_handler))
}
