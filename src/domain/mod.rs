//! Domain layer containing business entities and rules.
//!
//! Nothing in here touches HTTP or SQL. Repository traits describe what the
//! application layer needs from storage; the infrastructure layer provides
//! the PostgreSQL and in-memory implementations.
//!
//! # Modules
//!
//! - [`entities`] - Partners, links, click and conversion events
//! - [`repositories`] - Storage contracts
//! - [`access`] - Caller identity and authorization predicates
//!
//! # Event Flow
//!
//! 1. A visitor hits `/promo/{id}` and the redirector resolves the link
//! 2. An active link produces a [`entities::NewClick`] appended via
//!    [`repositories::EventRepository`]
//! 3. Conversions arrive through the tracking API as [`entities::NewConversion`]
//! 4. Stats requests aggregate the stored events through
//!    [`repositories::StatsRepository`]

pub mod access;
pub mod entities;
pub mod repositories;
