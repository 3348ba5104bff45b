//! DTOs for the public tracking endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Request body for `POST /api/track/click`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickRequest {
    #[validate(length(min = 1, max = 64))]
    pub link_id: String,
}

/// Request body for `POST /api/track/conversion`.
///
/// `type` is kept as a string so an unknown value surfaces as a validation
/// error with a proper message instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackConversionRequest {
    #[validate(length(min = 1, max = 64))]
    pub link_id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
}

impl TrackResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
