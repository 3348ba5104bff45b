mod common;

use partner_links::domain::entities::NewPartner;
use partner_links::domain::repositories::PartnerRepository;
use partner_links::error::AppError;
use partner_links::infrastructure::persistence::PgPartnerRepository;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn new_partner(email: &str) -> NewPartner {
    NewPartner {
        id: Uuid::new_v4(),
        email: email.to_string(),
        name: "Anna".to_string(),
    }
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_partner_defaults(pool: PgPool) {
    let repo = PgPartnerRepository::new(Arc::new(pool));

    let partner = repo.create(new_partner("anna@example.com")).await.unwrap();

    assert_eq!(partner.email, "anna@example.com");
    assert!(partner.is_active);
    assert!(!partner.is_admin);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_create_duplicate_partner_conflicts(pool: PgPool) {
    let repo = PgPartnerRepository::new(Arc::new(pool));
    let partner = new_partner("anna@example.com");

    repo.create(partner.clone()).await.unwrap();
    let result = repo.create(partner).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_update_flags_and_name(pool: PgPool) {
    let repo = PgPartnerRepository::new(Arc::new(pool));
    let partner = repo.create(new_partner("anna@example.com")).await.unwrap();

    let renamed = repo.update_name(partner.id, "Anna M.").await.unwrap().unwrap();
    assert_eq!(renamed.name, "Anna M.");
    assert!(renamed.updated_at >= partner.updated_at);

    let deactivated = repo.set_active(partner.id, false).await.unwrap().unwrap();
    assert!(!deactivated.is_active);

    let promoted = repo.set_admin(partner.id, true).await.unwrap().unwrap();
    assert!(promoted.is_admin);
    assert!(!promoted.is_active);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_update_unknown_partner_returns_none(pool: PgPool) {
    let repo = PgPartnerRepository::new(Arc::new(pool));

    assert!(repo.set_active(Uuid::new_v4(), false).await.unwrap().is_none());
    assert!(repo.update_name(Uuid::new_v4(), "x").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL instance (DATABASE_URL)"]
async fn test_list_all_newest_first(pool: PgPool) {
    let first = common::create_test_partner(&pool, "first@example.com").await;
    let second = common::create_test_partner(&pool, "second@example.com").await;
    sqlx::query("UPDATE partners SET created_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(first)
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgPartnerRepository::new(Arc::new(pool));
    let partners = repo.list_all().await.unwrap();

    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0].id, second);
    assert_eq!(partners[1].id, first);
}
