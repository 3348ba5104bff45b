//! Partner entity: an account that owns promotional links.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered partner.
///
/// The `id` is the user id assigned by the identity provider, so a verified
/// access token maps onto exactly one partner row.
#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a partner profile.
#[derive(Debug, Clone)]
pub struct NewPartner {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}
