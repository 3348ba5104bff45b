//! PostgreSQL implementation of partner repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewPartner, Partner};
use crate::domain::repositories::PartnerRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PartnerRow {
    id: Uuid,
    email: String,
    name: String,
    is_active: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PartnerRow> for Partner {
    fn from(r: PartnerRow) -> Self {
        Partner {
            id: r.id,
            email: r.email,
            name: r.name,
            is_active: r.is_active,
            is_admin: r.is_admin,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for partner profiles.
pub struct PgPartnerRepository {
    pool: Arc<PgPool>,
}

impl PgPartnerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for PgPartnerRepository {
    async fn create(&self, new_partner: NewPartner) -> Result<Partner, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            INSERT INTO partners (id, email, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, is_active, is_admin, created_at, updated_at
            "#,
        )
        .bind(new_partner.id)
        .bind(&new_partner.email)
        .bind(&new_partner.name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Partner>, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            SELECT id, email, name, is_active, is_admin, created_at, updated_at
            FROM partners
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Partner>, AppError> {
        let rows = sqlx::query_as::<_, PartnerRow>(
            r#"
            SELECT id, email, name, is_active, is_admin, created_at, updated_at
            FROM partners
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_name(&self, id: Uuid, name: &str) -> Result<Option<Partner>, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            UPDATE partners
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, is_active, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Partner>, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            UPDATE partners
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, is_active, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_admin(&self, id: Uuid, is_admin: bool) -> Result<Option<Partner>, AppError> {
        let row = sqlx::query_as::<_, PartnerRow>(
            r#"
            UPDATE partners
            SET is_admin = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, name, is_active, is_admin, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_admin)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
