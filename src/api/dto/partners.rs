//! DTOs for partner profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Partner;

/// Body of `POST /api/partners/register` and `PATCH /api/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(max = 200))]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Partner> for PartnerResponse {
    fn from(p: Partner) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            is_active: p.is_active,
            is_admin: p.is_admin,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// `{ "partner": { ... } }`
#[derive(Debug, Serialize)]
pub struct PartnerEnvelope {
    pub partner: PartnerResponse,
}

impl From<Partner> for PartnerEnvelope {
    fn from(partner: Partner) -> Self {
        Self {
            partner: partner.into(),
        }
    }
}

/// `{ "partners": [ ... ] }`
#[derive(Debug, Serialize)]
pub struct PartnerListResponse {
    pub partners: Vec<PartnerResponse>,
}

impl From<Vec<Partner>> for PartnerListResponse {
    fn from(partners: Vec<Partner>) -> Self {
        Self {
            partners: partners.into_iter().map(PartnerResponse::from).collect(),
        }
    }
}
