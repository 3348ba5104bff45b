//! PostgreSQL implementation of statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::{
    EventCounts, GlobalTotals, LinkCounts, StatsRepository, StatsWindow,
};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CountsRow {
    clicks: i64,
    signups: i64,
    purchases: i64,
}

impl From<CountsRow> for EventCounts {
    fn from(r: CountsRow) -> Self {
        EventCounts {
            clicks: r.clicks,
            signups: r.signups,
            purchases: r.purchases,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LinkCountsRow {
    link_id: String,
    clicks: i64,
    signups: i64,
    purchases: i64,
}

#[derive(sqlx::FromRow)]
struct GlobalRow {
    partners: i64,
    links: i64,
    clicks: i64,
    signups: i64,
    purchases: i64,
}

/// PostgreSQL repository for aggregate statistics.
///
/// Counts are computed with `COUNT(*)` over the event tables on every call.
/// Window bounds are bound as nullable `timestamptz` parameters, so one
/// statement serves both windowed and unbounded queries.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn link_counts(
        &self,
        link_id: &str,
        window: StatsWindow,
    ) -> Result<EventCounts, AppError> {
        let row = sqlx::query_as::<_, CountsRow>(
            r#"
            SELECT
                (SELECT COUNT(*)
                   FROM link_clicks c
                  WHERE c.link_id = $1
                    AND ($2::timestamptz IS NULL OR c.clicked_at >= $2)
                    AND ($3::timestamptz IS NULL OR c.clicked_at <= $3)) AS clicks,
                COUNT(*) FILTER (WHERE v.kind = 'signup') AS signups,
                COUNT(*) FILTER (WHERE v.kind = 'purchase') AS purchases
            FROM conversions v
            WHERE v.link_id = $1
              AND ($2::timestamptz IS NULL OR v.converted_at >= $2)
              AND ($3::timestamptz IS NULL OR v.converted_at <= $3)
            "#,
        )
        .bind(link_id)
        .bind(window.from)
        .bind(window.to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn click_times(
        &self,
        link_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AppError> {
        let times = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            SELECT clicked_at
            FROM link_clicks
            WHERE link_id = $1 AND clicked_at >= $2
            ORDER BY clicked_at ASC, id ASC
            "#,
        )
        .bind(link_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(times)
    }

    async fn partner_link_counts(
        &self,
        partner_id: Uuid,
        window: StatsWindow,
    ) -> Result<Vec<LinkCounts>, AppError> {
        let rows = sqlx::query_as::<_, LinkCountsRow>(
            r#"
            WITH owned AS (
                SELECT id, created_at FROM partner_links WHERE partner_id = $1
            ),
            clicks AS (
                SELECT link_id, COUNT(*) AS clicks
                FROM link_clicks
                WHERE link_id IN (SELECT id FROM owned)
                  AND ($2::timestamptz IS NULL OR clicked_at >= $2)
                  AND ($3::timestamptz IS NULL OR clicked_at <= $3)
                GROUP BY link_id
            ),
            convs AS (
                SELECT
                    link_id,
                    COUNT(*) FILTER (WHERE kind = 'signup') AS signups,
                    COUNT(*) FILTER (WHERE kind = 'purchase') AS purchases
                FROM conversions
                WHERE link_id IN (SELECT id FROM owned)
                  AND ($2::timestamptz IS NULL OR converted_at >= $2)
                  AND ($3::timestamptz IS NULL OR converted_at <= $3)
                GROUP BY link_id
            )
            SELECT
                o.id AS link_id,
                COALESCE(c.clicks, 0) AS clicks,
                COALESCE(v.signups, 0) AS signups,
                COALESCE(v.purchases, 0) AS purchases
            FROM owned o
            LEFT JOIN clicks c ON c.link_id = o.id
            LEFT JOIN convs v ON v.link_id = o.id
            ORDER BY o.created_at DESC, o.id
            "#,
        )
        .bind(partner_id)
        .bind(window.from)
        .bind(window.to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkCounts {
                link_id: r.link_id,
                counts: EventCounts {
                    clicks: r.clicks,
                    signups: r.signups,
                    purchases: r.purchases,
                },
            })
            .collect())
    }

    async fn global_totals(&self, window: StatsWindow) -> Result<GlobalTotals, AppError> {
        let row = sqlx::query_as::<_, GlobalRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM partners) AS partners,
                (SELECT COUNT(*) FROM partner_links) AS links,
                (SELECT COUNT(*)
                   FROM link_clicks
                  WHERE ($1::timestamptz IS NULL OR clicked_at >= $1)
                    AND ($2::timestamptz IS NULL OR clicked_at <= $2)) AS clicks,
                (SELECT COUNT(*)
                   FROM conversions
                  WHERE kind = 'signup'
                    AND ($1::timestamptz IS NULL OR converted_at >= $1)
                    AND ($2::timestamptz IS NULL OR converted_at <= $2)) AS signups,
                (SELECT COUNT(*)
                   FROM conversions
                  WHERE kind = 'purchase'
                    AND ($1::timestamptz IS NULL OR converted_at >= $1)
                    AND ($2::timestamptz IS NULL OR converted_at <= $2)) AS purchases
            "#,
        )
        .bind(window.from)
        .bind(window.to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(GlobalTotals {
            partners: row.partners,
            links: row.links,
            events: EventCounts {
                clicks: row.clicks,
                signups: row.signups,
                purchases: row.purchases,
            },
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
