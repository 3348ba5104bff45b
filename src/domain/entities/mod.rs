//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewPartner`, `NewLink`, `NewClick`, `NewConversion` - For creating new records
//!
//! Click and conversion events are append-only; only partners and links carry
//! mutable state (the `is_active` flag and the partner display name).

pub mod click;
pub mod conversion;
pub mod link;
pub mod partner;

pub use click::{Click, NewClick};
pub use conversion::{Conversion, ConversionKind, NewConversion};
pub use link::{Link, NewLink};
pub use partner::{NewPartner, Partner};
