//! Handler for promo link redirects.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::ClientInfo;

/// Sends a visitor on to the promo destination.
///
/// # Endpoint
///
/// `GET /promo/{id}`
///
/// # Request Flow
///
/// 1. Look up the link by id
/// 2. Missing or inactive link: redirect to the home URL, record nothing
/// 3. Record the click with referer, user agent and forwarded client IP
/// 4. Return 307 Temporary Redirect to the destination with `?promo={code}`
///
/// A failure while recording the click is logged and does not affect the
/// response.
///
/// # Errors
///
/// Returns 500 Internal Server Error only if the link lookup fails.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Redirect, AppError> {
    let outcome = state
        .redirect_service
        .resolve(&id, ClientInfo::from_headers(&headers))
        .await?;

    Ok(Redirect::temporary(outcome.location()))
}
