//! Repository trait for append-only click and conversion events.

use crate::domain::entities::{Click, Conversion, NewClick, NewConversion};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording events.
///
/// Events are never updated or deleted, so concurrent inserts for the same
/// link need no coordination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Appends a click with a storage-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Appends a conversion with a storage-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_conversion(&self, new_conversion: NewConversion)
    -> Result<Conversion, AppError>;
}
