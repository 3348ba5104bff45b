//! PostgreSQL repository implementations.
//!
//! Queries are prepared statements built with `sqlx::query_as` and decoded into
//! private `FromRow` structs, then converted into domain entities.
//!
//! # Repositories
//!
//! - [`PgPartnerRepository`] - Partner profiles
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgEventRepository`] - Click and conversion inserts
//! - [`PgStatsRepository`] - Aggregation queries

pub mod pg_event_repository;
pub mod pg_link_repository;
pub mod pg_partner_repository;
pub mod pg_stats_repository;

pub use pg_event_repository::PgEventRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_partner_repository::PgPartnerRepository;
pub use pg_stats_repository::PgStatsRepository;
