//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure` (PostgreSQL for production, in-memory for tests
//! and local experiments). Mock implementations are generated via `mockall`
//! for service unit tests.
//!
//! # Available Repositories
//!
//! - [`PartnerRepository`] - Partner profiles
//! - [`LinkRepository`] - Promotional link storage
//! - [`EventRepository`] - Append-only click and conversion events
//! - [`StatsRepository`] - Read-time aggregation over events

pub mod event_repository;
pub mod link_repository;
pub mod partner_repository;
pub mod stats_repository;

pub use event_repository::EventRepository;
pub use link_repository::LinkRepository;
pub use partner_repository::PartnerRepository;
pub use stats_repository::{EventCounts, GlobalTotals, LinkCounts, StatsRepository, StatsWindow};

#[cfg(test)]
pub use event_repository::MockEventRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use partner_repository::MockPartnerRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
