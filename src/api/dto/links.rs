//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Link;

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(length(max = 200))]
    pub name: String,

    #[validate(length(max = 64))]
    pub promo_code: String,

    #[validate(length(max = 253))]
    pub domain: String,
}

/// Request body for `PATCH /api/links`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 64))]
    pub link_id: String,
    pub is_active: bool,
}

/// Request body for admin toggles on `/api/admin/{links,partners}/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: String,
    pub partner_id: Uuid,
    pub name: String,
    pub promo_code: String,
    pub domain: String,
    pub url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            partner_id: link.partner_id,
            name: link.name,
            promo_code: link.promo_code,
            domain: link.domain,
            url: link.url,
            is_active: link.is_active,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// `{ "link": { ... } }`
#[derive(Debug, Serialize)]
pub struct LinkEnvelope {
    pub link: LinkResponse,
}

impl From<Link> for LinkEnvelope {
    fn from(link: Link) -> Self {
        Self { link: link.into() }
    }
}

/// `{ "links": [ ... ] }`
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}

impl From<Vec<Link>> for LinkListResponse {
    fn from(links: Vec<Link>) -> Self {
        Self {
            links: links.into_iter().map(LinkResponse::from).collect(),
        }
    }
}
