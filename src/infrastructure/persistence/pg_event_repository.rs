//! PostgreSQL implementation of event repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, Conversion, NewClick, NewConversion};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: String,
    clicked_at: DateTime<Utc>,
    referer: Option<String>,
    user_agent: Option<String>,
    ip: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ConversionRow {
    id: i64,
    link_id: String,
    kind: String,
    converted_at: DateTime<Utc>,
    metadata: Option<Value>,
}

impl TryFrom<ConversionRow> for Conversion {
    type Error = AppError;

    fn try_from(r: ConversionRow) -> Result<Self, Self::Error> {
        let kind = r.kind.parse().map_err(|_| {
            AppError::internal(
                "Stored conversion has an unknown type",
                json!({ "id": r.id, "kind": r.kind }),
            )
        })?;

        Ok(Conversion {
            id: r.id,
            link_id: r.link_id,
            kind,
            converted_at: r.converted_at,
            metadata: r.metadata,
        })
    }
}

/// PostgreSQL repository for append-only events.
///
/// A missing link surfaces as a foreign key violation, which maps to
/// [`AppError::NotFound`].
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO link_clicks (link_id, referer, user_agent, ip)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, clicked_at, referer, user_agent, ip
            "#,
        )
        .bind(&new_click.link_id)
        .bind(&new_click.referer)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Click {
            id: row.id,
            link_id: row.link_id,
            clicked_at: row.clicked_at,
            referer: row.referer,
            user_agent: row.user_agent,
            ip: row.ip,
        })
    }

    async fn record_conversion(
        &self,
        new_conversion: NewConversion,
    ) -> Result<Conversion, AppError> {
        let row = sqlx::query_as::<_, ConversionRow>(
            r#"
            INSERT INTO conversions (link_id, kind, metadata)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, kind, converted_at, metadata
            "#,
        )
        .bind(&new_conversion.link_id)
        .bind(new_conversion.kind.as_str())
        .bind(&new_conversion.metadata)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }
}
