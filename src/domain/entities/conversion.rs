//! Conversion entity: a sign-up or purchase attributed to a link.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// The kind of conversion a visitor completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    Signup,
    Purchase,
}

impl ConversionKind {
    pub const ALL: [ConversionKind; 2] = [ConversionKind::Signup, ConversionKind::Purchase];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionKind::Signup => "signup",
            ConversionKind::Purchase => "purchase",
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known conversion kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conversion type '{0}'")]
pub struct UnknownConversionKind(pub String);

impl FromStr for ConversionKind {
    type Err = UnknownConversionKind;

    /// Parses the wire name. Matching is exact: `"Signup"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(ConversionKind::Signup),
            "purchase" => Ok(ConversionKind::Purchase),
            other => Err(UnknownConversionKind(other.to_string())),
        }
    }
}

/// An immutable conversion event.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub id: i64,
    pub link_id: String,
    pub kind: ConversionKind,
    pub converted_at: DateTime<Utc>,
    pub metadata: Option<Value>,
}

/// Input data for recording a conversion.
#[derive(Debug, Clone)]
pub struct NewConversion {
    pub link_id: String,
    pub kind: ConversionKind,
    pub metadata: Option<Value>,
}
