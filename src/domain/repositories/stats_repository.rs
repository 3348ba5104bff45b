//! Repository trait for read-time event aggregation.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Optional time range applied to event timestamps (both bounds inclusive).
///
/// The default window is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl StatsWindow {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// A window covering everything from `from` onwards.
    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Click and conversion totals for some scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub clicks: i64,
    pub signups: i64,
    pub purchases: i64,
}

impl EventCounts {
    pub fn add(&mut self, other: &EventCounts) {
        self.clicks += other.clicks;
        self.signups += other.signups;
        self.purchases += other.purchases;
    }
}

/// Counts for one link inside a partner-scoped listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCounts {
    pub link_id: String,
    pub counts: EventCounts,
}

/// System-wide totals for the admin overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalTotals {
    pub partners: i64,
    pub links: i64,
    pub events: EventCounts,
}

/// Repository interface for aggregate statistics.
///
/// Every method counts stored events at call time; no counters are cached.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStatsRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Counts clicks, sign-ups and purchases for one link inside `window`.
    ///
    /// An unknown link yields all-zero counts.
    async fn link_counts(&self, link_id: &str, window: StatsWindow)
    -> Result<EventCounts, AppError>;

    /// Returns click timestamps for one link at or after `since`, oldest first.
    async fn click_times(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError>;

    /// Per-link counts for every link owned by `partner_id`, newest link first.
    ///
    /// Links without events are included with zero counts.
    async fn partner_link_counts(
        &self,
        partner_id: Uuid,
        window: StatsWindow,
    ) -> Result<Vec<LinkCounts>, AppError>;

    /// Partner, link and event totals across the whole system.
    ///
    /// `window` restricts event counts only.
    async fn global_totals(&self, window: StatsWindow) -> Result<GlobalTotals, AppError>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
