#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use partner_links::application::services::AuthService;
use partner_links::domain::entities::Partner;
use partner_links::infrastructure::memory::MemoryStore;
use partner_links::routes::router_without_rate_limit;
use partner_links::state::{AppState, Repositories, ServiceSettings};

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const JWT_AUDIENCE: &str = "authenticated";

/// In-memory application plus the store behind it, for assertions on
/// recorded events.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        jwt_secret: JWT_SECRET.to_string(),
        jwt_audience: JWT_AUDIENCE.to_string(),
        allowed_domains: vec!["alixia.ch".to_string(), "solvin.ch".to_string()],
        promo_destination: Url::parse("https://alixia.ch").unwrap(),
        home_url: "/".to_string(),
        click_history_days: 30,
    }
}

pub fn create_test_state(store: Arc<MemoryStore>) -> AppState {
    let repos = Repositories {
        partners: store.clone(),
        links: store.clone(),
        events: store.clone(),
        stats: store,
    };

    AppState::new(repos, settings())
}

pub fn create_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app = router_without_rate_limit(create_test_state(store.clone()));

    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
    }
}

/// Signs an access token the way the identity provider would.
pub fn token_for(user_id: Uuid, email: Option<&str>) -> String {
    AuthService::new(JWT_SECRET, JWT_AUDIENCE)
        .issue_token(user_id, email, Duration::hours(1))
        .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Registers a partner through the API and returns its id and token.
pub async fn register_partner(app: &TestApp, name: &str) -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    let email = format!("{}@example.com", name.to_lowercase());
    let token = token_for(user_id, Some(&email));

    app.server
        .post("/api/partners/register")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "name": name }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    (user_id, token)
}

/// Inserts an admin partner directly into the store and returns its token.
pub async fn insert_admin(app: &TestApp) -> (Uuid, String) {
    let now = Utc::now();
    let admin = Partner {
        id: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        name: "Admin".to_string(),
        is_active: true,
        is_admin: true,
        created_at: now,
        updated_at: now,
    };
    let id = admin.id;
    app.store.insert_partner(admin).await;

    (id, token_for(id, Some("admin@example.com")))
}

/// Creates a link through the API and returns its JSON representation.
pub async fn create_link(app: &TestApp, token: &str, promo_code: &str, domain: &str) -> Value {
    let response = app
        .server
        .post("/api/links")
        .add_header("Authorization", bearer(token))
        .json(&json!({
            "name": format!("{} campaign", promo_code),
            "promoCode": promo_code,
            "domain": domain
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["link"].clone()
}

// ─── PostgreSQL fixtures ─────────────────────────────────────────────────────

pub async fn create_test_partner(pool: &PgPool, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO partners (id, email, name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind("Test Partner")
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn create_test_link(pool: &PgPool, id: &str, partner_id: Uuid, promo_code: &str) {
    sqlx::query(
        "INSERT INTO partner_links (id, partner_id, name, promo_code, domain, url)
         VALUES ($1, $2, $3, $4, 'alixia.ch', $5)",
    )
    .bind(id)
    .bind(partner_id)
    .bind("Test link")
    .bind(promo_code)
    .bind(format!("https://alixia.ch/promo/{}", id))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_click(pool: &PgPool, link_id: &str, age: Duration) {
    sqlx::query("INSERT INTO link_clicks (link_id, clicked_at) VALUES ($1, $2)")
        .bind(link_id)
        .bind(Utc::now() - age)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_test_conversion(pool: &PgPool, link_id: &str, kind: &str) {
    sqlx::query("INSERT INTO conversions (link_id, kind) VALUES ($1, $2)")
        .bind(link_id)
        .bind(kind)
        .execute(pool)
        .await
        .unwrap();
}
