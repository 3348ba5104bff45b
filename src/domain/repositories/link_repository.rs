//! Repository trait for promotional links.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for promotional links.
///
/// Ownership is not filtered here; callers apply
/// [`crate::domain::access`] predicates to the returned rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with `is_active = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Lists a partner's links, newest first.
    async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Updates the active flag and returns the updated link.
    ///
    /// Returns `Ok(None)` if no link has this id.
    async fn set_active(&self, id: &str, is_active: bool) -> Result<Option<Link>, AppError>;
}
