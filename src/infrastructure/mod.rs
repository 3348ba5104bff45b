//! Infrastructure layer implementing the domain repository traits.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repositories (production)
//! - [`memory`] - In-memory repositories (tests, local experiments)

pub mod memory;
pub mod persistence;
