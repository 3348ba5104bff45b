//! Caller identity and authorization predicates.
//!
//! Ownership rules live here as plain functions instead of `WHERE partner_id = $1`
//! filters inside SQL, so every rule can be tested without a database. Services
//! evaluate them before each mutating or scoped read operation.

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Link, Partner};
use crate::error::AppError;

/// The subject of a verified access token, before any partner lookup.
///
/// Only registration works with a bare identity; every other route needs a
/// [`Caller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: Option<String>,
}

/// A verified caller: the partner behind the bearer token and its admin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub partner_id: Uuid,
    pub is_admin: bool,
}

impl Caller {
    pub fn partner(partner_id: Uuid) -> Self {
        Self {
            partner_id,
            is_admin: false,
        }
    }

    pub fn admin(partner_id: Uuid) -> Self {
        Self {
            partner_id,
            is_admin: true,
        }
    }
}

impl From<&Partner> for Caller {
    fn from(partner: &Partner) -> Self {
        Self {
            partner_id: partner.id,
            is_admin: partner.is_admin,
        }
    }
}

/// Admins may act on any link; partners only on their own.
pub fn can_manage_link(caller: &Caller, link: &Link) -> bool {
    caller.is_admin || link.is_owned_by(caller.partner_id)
}

/// Admins may read any partner's data; partners only their own.
pub fn can_view_partner(caller: &Caller, partner_id: Uuid) -> bool {
    caller.is_admin || caller.partner_id == partner_id
}

/// Fails with [`AppError::Forbidden`] unless the caller is an admin.
pub fn require_admin(caller: &Caller) -> Result<(), AppError> {
    if caller.is_admin {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Admin privileges required",
            json!({ "partner_id": caller.partner_id }),
        ))
    }
}

/// Returns the link if the caller may manage it.
///
/// A link the caller does not own is reported as missing, so partners cannot
/// enumerate other partners' link ids.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if `link` is `None` or not manageable.
pub fn authorize_link(caller: &Caller, link_id: &str, link: Option<Link>) -> Result<Link, AppError> {
    match link {
        Some(link) if can_manage_link(caller, &link) => Ok(link),
        _ => Err(AppError::not_found(
            "Link not found",
            json!({ "link_id": link_id }),
        )),
    }
}
