//! Handler for partner-facing statistics.

use axum::{
    Json,
    extract::State,
};

use crate::api::dto::stats::{StatsQuery, StatsResponse};
use crate::api::extract::ValidQuery;
use crate::domain::access::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for one link or for all of the caller's links.
///
/// # Endpoint
///
/// `GET /api/stats?linkId=&from=&to=`
///
/// # Query Parameters
///
/// - `linkId` - when present, stats for that link including `clickHistory`
///   (click timestamps over the trailing history window, oldest first);
///   otherwise a per-link overview of the caller's links with totals
/// - `from`, `to` - optional RFC 3339 bounds (inclusive) for the counts
///
/// # Errors
///
/// Returns 400 Bad Request for malformed timestamps or `from` after `to`.
/// Returns 404 Not Found if `linkId` is unknown or belongs to another partner.
pub async fn stats_handler(
    State(state): State<AppState>,
    caller: Caller,
    ValidQuery(query): ValidQuery<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let window = query.window();

    let response = match query.link_id.as_deref() {
        Some(link_id) => StatsResponse::Link(
            state
                .stats_service
                .link_stats(&caller, link_id, window)
                .await?
                .into(),
        ),
        None => StatsResponse::Partner(
            state
                .stats_service
                .partner_stats(&caller, caller.partner_id, window)
                .await?
                .into(),
        ),
    };

    Ok(Json(response))
}
