//! Admin-only endpoints.
//!
//! Every handler rejects non-admin callers with 403 Forbidden before doing
//! any work.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::api::dto::links::{LinkEnvelope, LinkListResponse, SetActiveRequest};
use crate::api::dto::partners::{PartnerEnvelope, PartnerListResponse};
use crate::api::dto::stats::{GlobalStatsResponse, StatsQuery};
use crate::api::extract::ValidQuery;
use crate::domain::access::{Caller, require_admin};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/admin/partners`
pub async fn admin_partners_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<PartnerListResponse>, AppError> {
    let partners = state.partner_service.list_all(&caller).await?;
    Ok(Json(partners.into()))
}

/// Activates or deactivates a partner.
///
/// # Endpoint
///
/// `PATCH /api/admin/partners/{id}` with `{ "isActive": false }`
///
/// # Errors
///
/// Returns 400 Bad Request if an admin tries to deactivate itself.
/// Returns 404 Not Found if the partner does not exist.
pub async fn admin_update_partner_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(partner_id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<PartnerEnvelope>, AppError> {
    let partner = state
        .partner_service
        .set_active(&caller, partner_id, payload.is_active)
        .await?;

    Ok(Json(partner.into()))
}

/// `GET /api/admin/links`
pub async fn admin_links_handler(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_all(&caller).await?;
    Ok(Json(links.into()))
}

/// `PATCH /api/admin/links/{id}` with `{ "isActive": false }`
pub async fn admin_update_link_handler(
    State(state): State<AppState>,
    caller: Caller,
    Path(link_id): Path<String>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<LinkEnvelope>, AppError> {
    require_admin(&caller)?;

    let link = state
        .link_service
        .set_active(&caller, &link_id, payload.is_active)
        .await?;

    Ok(Json(link.into()))
}

/// System-wide totals, optionally windowed with `?from=&to=`.
///
/// # Endpoint
///
/// `GET /api/admin/stats`
pub async fn admin_stats_handler(
    State(state): State<AppState>,
    caller: Caller,
    ValidQuery(query): ValidQuery<StatsQuery>,
) -> Result<Json<GlobalStatsResponse>, AppError> {
    let totals = state
        .stats_service
        .global_stats(&caller, query.window())
        .await?;

    Ok(Json(totals.into()))
}
