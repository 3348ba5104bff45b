//! Repository trait for partner profiles.

use crate::domain::entities::{NewPartner, Partner};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for partner profiles.
///
/// Partners are never hard-deleted; deactivation goes through [`Self::set_active`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Inserts a new partner with `is_active = true` and `is_admin = false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a partner with the same id exists.
    async fn create(&self, new_partner: NewPartner) -> Result<Partner, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Partner>, AppError>;

    /// Lists all partners, newest first.
    async fn list_all(&self) -> Result<Vec<Partner>, AppError>;

    /// Changes the display name. Returns `Ok(None)` if the partner does not exist.
    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Partner>, AppError>;

    /// Changes the active flag. Returns `Ok(None)` if the partner does not exist.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Partner>, AppError>;

    /// Grants or revokes admin rights. Only reachable from the admin CLI.
    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<Partner>, AppError>;
}
