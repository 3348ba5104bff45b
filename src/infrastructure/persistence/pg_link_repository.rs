//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: String,
    partner_id: Uuid,
    name: String,
    promo_code: String,
    domain: String,
    url: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            partner_id: r.partner_id,
            name: r.name,
            promo_code: r.promo_code,
            domain: r.domain,
            url: r.url,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO partner_links (id, partner_id, name, promo_code, domain, url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, partner_id, name, promo_code, domain, url, is_active, created_at, updated_at
            "#,
        )
        .bind(&new_link.id)
        .bind(new_link.partner_id)
        .bind(&new_link.name)
        .bind(&new_link.promo_code)
        .bind(&new_link.domain)
        .bind(&new_link.url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, partner_id, name, promo_code, domain, url, is_active, created_at, updated_at
            FROM partner_links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_partner(&self, partner_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, partner_id, name, promo_code, domain, url, is_active, created_at, updated_at
            FROM partner_links
            WHERE partner_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(partner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, partner_id, name, promo_code, domain, url, is_active, created_at, updated_at
            FROM partner_links
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE partner_links
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, partner_id, name, promo_code, domain, url, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
