//! Link entity representing a partner's promotional short link.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A promotional link owned by a partner.
///
/// Only `is_active` changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
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

impl Link {
    /// Builds the public URL for a link id served under `domain`.
    pub fn public_url(domain: &str, id: &str) -> String {
        format!("https://{}/promo/{}", domain.trim_end_matches('/'), id)
    }

    /// Returns true if `partner_id` owns this link.
    pub fn is_owned_by(&self, partner_id: Uuid) -> bool {
        self.partner_id == partner_id
    }
}

/// Input data for creating a new link.
///
/// `promo_code` is expected to be normalized (trimmed, uppercased) already.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: String,
    pub partner_id: Uuid,
    pub name: String,
    pub promo_code: String,
    pub domain: String,
    pub url: String,
}
