mod common;

use axum::http::StatusCode;
use chrono::Duration;
use partner_links::application::services::AuthService;
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = common::create_test_app();

    let response = app.server.get("/api/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_malformed_header_is_unauthorized() {
    let app = common::create_test_app();

    app.server
        .get("/api/links")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = common::create_test_app();
    let token = AuthService::new("some-other-secret", common::JWT_AUDIENCE)
        .issue_token(Uuid::new_v4(), Some("anna@example.com"), Duration::hours(1))
        .unwrap();

    app.server
        .post("/api/partners/register")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "name": "Anna" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_other_audience_is_unauthorized() {
    let app = common::create_test_app();
    let token = AuthService::new(common::JWT_SECRET, "anon")
        .issue_token(Uuid::new_v4(), Some("anna@example.com"), Duration::hours(1))
        .unwrap();

    app.server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = common::create_test_app();
    let token = AuthService::new(common::JWT_SECRET, common::JWT_AUDIENCE)
        .issue_token(Uuid::new_v4(), Some("anna@example.com"), Duration::hours(-2))
        .unwrap();

    app.server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tracking_routes_do_not_require_token() {
    let app = common::create_test_app();

    // 404 from the service, not 401 from the auth layer.
    app.server
        .post("/api/track/click")
        .json(&json!({ "linkId": "missing1" }))
        .await
        .assert_status_not_found();
}
