//! Public tracking endpoints called from partner landing pages.

use axum::{Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::track::{TrackClickRequest, TrackConversionRequest, TrackResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::ClientInfo;

/// Records a click for a link.
///
/// # Endpoint
///
/// `POST /api/track/click`
///
/// ```json
/// { "linkId": "x7Kp2mQa" }
/// ```
///
/// Client metadata comes from `Referer`, `User-Agent` and
/// `X-Forwarded-For` / `X-Real-IP`. The link's active flag is not checked.
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist.
pub async fn track_click_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<TrackClickRequest>,
) -> Result<Json<TrackResponse>, AppError> {
    payload.validate()?;

    state
        .event_service
        .record_click(&payload.link_id, ClientInfo::from_headers(&headers))
        .await?;

    Ok(Json(TrackResponse::ok()))
}

/// Records a sign-up or purchase.
///
/// # Endpoint
///
/// `POST /api/track/conversion`
///
/// ```json
/// { "linkId": "x7Kp2mQa", "type": "purchase", "metadata": { "orderId": "A-1" } }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `type` is not `signup` or `purchase`.
/// Returns 404 Not Found if the link does not exist.
pub async fn track_conversion_handler(
    State(state): State<AppState>,
    Json(payload): Json<TrackConversionRequest>,
) -> Result<Json<TrackResponse>, AppError> {
    payload.validate()?;

    state
        .event_service
        .record_conversion(&payload.link_id, &payload.kind, payload.metadata)
        .await?;

    Ok(Json(TrackResponse::ok()))
}
