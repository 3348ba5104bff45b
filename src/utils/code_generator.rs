//! Short link id generation and input normalization.
//!
//! Link ids are random and URL-safe; promo codes are free text that is
//! stored uppercased.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Random bytes per link id. Six bytes encode to exactly eight base64 characters.
const LINK_ID_BYTES: usize = 6;

/// Length of a generated link id.
pub const LINK_ID_LEN: usize = 8;

/// Upper bound accepted when parsing ids from request paths.
const MAX_LINK_ID_LEN: usize = 64;

/// Generates a random URL-safe link id of [`LINK_ID_LEN`] characters.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_link_id() -> Result<String, AppError> {
    let mut buffer = [0u8; LINK_ID_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate link id",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `id` could have been produced by [`generate_link_id`]
/// or an older id scheme: non-empty, bounded, URL-safe characters only.
pub fn is_plausible_link_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LINK_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Trims and uppercases a promo code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is blank.
pub fn normalize_promo_code(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "Promo code must not be empty",
            json!({ "field": "promoCode" }),
        ));
    }
    Ok(trimmed.to_uppercase())
}
