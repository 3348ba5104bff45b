//! DTOs for statistics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use uuid::Uuid;

use crate::application::services::{LinkStats, PartnerStats};
use crate::domain::repositories::{GlobalTotals, LinkCounts, StatsWindow};

/// Query parameters of `GET /api/stats` and `GET /api/admin/stats`.
///
/// Empty values (`?from=`) are treated as absent. Timestamps are RFC 3339.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub link_id: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl StatsQuery {
    pub fn window(&self) -> StatsWindow {
        StatsWindow::new(self.from, self.to)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsResponse {
    pub link_id: String,
    pub clicks: i64,
    pub signups: i64,
    pub purchases: i64,
    pub click_history: Vec<DateTime<Utc>>,
}

impl From<LinkStats> for LinkStatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            link_id: stats.link_id,
            clicks: stats.counts.clicks,
            signups: stats.counts.signups,
            purchases: stats.counts.purchases,
            click_history: stats.click_history,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCountsResponse {
    pub link_id: String,
    pub clicks: i64,
    pub signups: i64,
    pub purchases: i64,
}

impl From<LinkCounts> for LinkCountsResponse {
    fn from(row: LinkCounts) -> Self {
        Self {
            link_id: row.link_id,
            clicks: row.counts.clicks,
            signups: row.counts.signups,
            purchases: row.counts.purchases,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerStatsResponse {
    pub partner_id: Uuid,
    pub total_clicks: i64,
    pub total_signups: i64,
    pub total_purchases: i64,
    pub per_link: Vec<LinkCountsResponse>,
}

impl From<PartnerStats> for PartnerStatsResponse {
    fn from(stats: PartnerStats) -> Self {
        Self {
            partner_id: stats.partner_id,
            total_clicks: stats.totals.clicks,
            total_signups: stats.totals.signups,
            total_purchases: stats.totals.purchases,
            per_link: stats
                .per_link
                .into_iter()
                .map(LinkCountsResponse::from)
                .collect(),
        }
    }
}

/// Either a single link's stats or a partner overview, depending on
/// whether `linkId` was given.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatsResponse {
    Link(LinkStatsResponse),
    Partner(PartnerStatsResponse),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStatsResponse {
    pub total_partners: i64,
    pub total_links: i64,
    pub total_clicks: i64,
    pub total_signups: i64,
    pub total_purchases: i64,
}

impl From<GlobalTotals> for GlobalStatsResponse {
    fn from(totals: GlobalTotals) -> Self {
        Self {
            total_partners: totals.partners,
            total_links: totals.links,
            total_clicks: totals.events.clicks,
            total_signups: totals.events.signups,
            total_purchases: totals.events.purchases,
        }
    }
}
