//! Handlers for the caller's promo links.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkEnvelope, LinkListResponse, UpdateLinkRequest,
};
use crate::domain::access::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state
        .link_service
        .list_by_partner(caller.partner_id)
        .await?;

    Ok(Json(links.into()))
}

/// Creates a promo link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// ```json
/// { "name": "Summer campaign", "promoCode": "summer24", "domain": "alixia.ch" }
/// ```
///
/// The promo code is stored uppercased. The response carries the public
/// URL `https://{domain}/promo/{id}`.
///
/// # Errors
///
/// Returns 400 Bad Request if a field is blank or the domain is not allowed.
pub async fn create_link_handler(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkEnvelope>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(
            caller.partner_id,
            &payload.name,
            &payload.promo_code,
            &payload.domain,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Activates or deactivates one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /api/links`
///
/// ```json
/// { "linkId": "x7Kp2mQa", "isActive": false }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or belongs to another
/// partner.
pub async fn update_link_handler(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkEnvelope>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .set_active(&caller, &payload.link_id, payload.is_active)
        .await?;

    Ok(Json(link.into()))
}
