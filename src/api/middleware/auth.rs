//! Bearer token authentication.
//!
//! [`layer`] verifies the access token and stores the resulting
//! [`Identity`] in the request extensions. Handlers that act on behalf of a
//! partner take a [`Caller`] argument, which looks the partner up and
//! rejects unregistered or deactivated accounts.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::access::{Caller, Identity};
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Signature, expiry or audience does not verify
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let identity = st.auth_service.verify_token(&token)?;
    parts.extensions.insert(identity);

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Request was not authenticated"}),
                )
            })?;

        state.partner_service.resolve_caller(&identity).await
    }
}
