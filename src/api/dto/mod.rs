//! Data Transfer Objects for API requests and responses.
//!
//! JSON bodies and query strings use camelCase field names. Request DTOs
//! derive `validator::Validate` for length limits; semantic checks (blank
//! names, allowed domains, conversion types) stay in the services.

pub mod health;
pub mod links;
pub mod partners;
pub mod stats;
pub mod track;
