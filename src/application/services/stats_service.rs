//! Read-time statistics over recorded events.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::access::{Caller, authorize_link, can_view_partner, require_admin};
use crate::domain::repositories::{
    EventCounts, GlobalTotals, LinkCounts, LinkRepository, StatsRepository, StatsWindow,
};
use crate::error::AppError;

/// Counts and click history for a single link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkStats {
    pub link_id: String,
    pub counts: EventCounts,
    /// Click timestamps inside the trailing history window, oldest first.
    pub click_history: Vec<DateTime<Utc>>,
}

/// Totals across a partner's links plus the per-link breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerStats {
    pub partner_id: Uuid,
    pub totals: EventCounts,
    pub per_link: Vec<LinkCounts>,
}

/// Service computing click and conversion statistics.
///
/// Nothing is cached: every call counts the stored events.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    stats: Arc<dyn StatsRepository>,
    click_history_days: i64,
}

impl StatsService {
    /// Creates a new statistics service.
    ///
    /// `click_history_days` sets the trailing window of
    /// [`LinkStats::click_history`].
    pub fn new(
        links: Arc<dyn LinkRepository>,
        stats: Arc<dyn StatsRepository>,
        click_history_days: i64,
    ) -> Self {
        Self {
            links,
            stats,
            click_history_days,
        }
    }

    /// Statistics for one link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist or the caller
    /// may not read it.
    /// Returns [`AppError::Validation`] if `window.from` is after `window.to`.
    pub async fn link_stats(
        &self,
        caller: &Caller,
        link_id: &str,
        window: StatsWindow,
    ) -> Result<LinkStats, AppError> {
        check_window(&window)?;

        let found = self.links.find_by_id(link_id).await?;
        let link = authorize_link(caller, link_id, found)?;

        let counts = self.stats.link_counts(&link.id, window).await?;
        let since = Utc::now() - Duration::days(self.click_history_days);
        let click_history = self.stats.click_times(&link.id, since).await?;

        Ok(LinkStats {
            link_id: link.id,
            counts,
            click_history,
        })
    }

    /// Totals and per-link counts for every link a partner owns.
    ///
    /// A partner without links gets zero totals and an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if a non-admin asks for another partner.
    /// Returns [`AppError::Validation`] if `window.from` is after `window.to`.
    pub async fn partner_stats(
        &self,
        caller: &Caller,
        partner_id: Uuid,
        window: StatsWindow,
    ) -> Result<PartnerStats, AppError> {
        check_window(&window)?;

        if !can_view_partner(caller, partner_id) {
            return Err(AppError::forbidden(
                "Cannot read another partner's statistics",
                json!({ "partner_id": partner_id }),
            ));
        }

        let per_link = self.stats.partner_link_counts(partner_id, window).await?;

        let mut totals = EventCounts::default();
        for row in &per_link {
            totals.add(&row.counts);
        }

        Ok(PartnerStats {
            partner_id,
            totals,
            per_link,
        })
    }

    /// System-wide totals. Admin only.
    pub async fn global_stats(
        &self,
        caller: &Caller,
        window: StatsWindow,
    ) -> Result<GlobalTotals, AppError> {
        require_admin(caller)?;
        check_window(&window)?;

        self.stats.global_totals(window).await
    }

    /// Round-trips to storage for the health check.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.stats.ping().await
    }
}

fn check_window(window: &StatsWindow) -> Result<(), AppError> {
    if let (Some(from), Some(to)) = (window.from, window.to)
        && from > to
    {
        return Err(AppError::bad_request(
            "Invalid time range: 'from' is after 'to'",
            json!({ "from": from, "to": to }),
        ));
    }
    Ok(())
}
