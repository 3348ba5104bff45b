//! Handlers for the caller's own partner profile.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::partners::{PartnerEnvelope, ProfileRequest};
use crate::domain::access::{Caller, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Creates the partner profile for a signed-in identity.
///
/// # Endpoint
///
/// `POST /api/partners/register`
///
/// Needs a valid bearer token but no existing profile. The partner id and
/// email come from the token.
///
/// # Errors
///
/// Returns 400 Bad Request if the name is blank or the token has no email.
/// Returns 409 Conflict if the profile already exists.
pub async fn register_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ProfileRequest>,
) -> Result<(StatusCode, Json<PartnerEnvelope>), AppError> {
    payload.validate()?;

    let partner = state
        .partner_service
        .register(&identity, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(partner.into())))
}

/// `GET /api/me`
pub async fn me_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<PartnerEnvelope>, AppError> {
    let partner = state.partner_service.me(&caller).await?;
    Ok(Json(partner.into()))
}

/// `PATCH /api/me` with `{ "name": "..." }`.
pub async fn update_me_handler(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<PartnerEnvelope>, AppError> {
    payload.validate()?;

    let partner = state
        .partner_service
        .update_profile(&caller, &payload.name)
        .await?;

    Ok(Json(partner.into()))
}
