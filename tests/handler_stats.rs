mod common;

use chrono::{Duration, SecondsFormat, Utc};
use partner_links::domain::entities::NewClick;
use serde_json::{Value, json};

fn rfc3339(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_partner_stats_without_links_are_zero() {
    let app = common::create_test_app();
    let (partner_id, token) = common::register_partner(&app, "Anna").await;

    let response = app
        .server
        .get("/api/stats")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "partnerId": partner_id,
        "totalClicks": 0,
        "totalSignups": 0,
        "totalPurchases": 0,
        "perLink": []
    }));
}

#[tokio::test]
async fn test_partner_stats_sum_over_links() {
    let app = common::create_test_app();
    let (_, token) = common::register_partner(&app, "Anna").await;
    let first = common::create_link(&app, &token, "first", "alixia.ch").await;
    let second = common::create_link(&app, &token, "second", "solvin.ch").await;

    for (link, clicks) in [(&first, 2), (&second, 1)] {
        for _ in 0..clicks {
            app.server
                .post("/api/track/click")
                .json(&json!({ "linkId": link["id"] }))
                .await
                .assert_status_ok();
        }
    }
    app.server
        .post("/api/track/conversion")
        .json(&json!({ "linkId": second["id"], "type": "purchase" }))
        .await
        .assert_status_ok();

    let body = app
        .server
        .get("/api/stats")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();

    assert_eq!(body["totalClicks"], 3);
    assert_eq!(body["totalSignups"], 0);
    assert_eq!(body["totalPurchases"], 1);

    let per_link = body["perLink"].as_array().unwrap();
    assert_eq!(per_link.len(), 2);
    assert_eq!(per_link[0]["linkId"], second["id"]);
    assert_eq!(per_link[0]["clicks"], 1);
    assert_eq!(per_link[1]["linkId"], first["id"]);
    assert_eq!(per_link[1]["clicks"], 2);
}

#[tokio::test]
async fn test_link_stats_respect_window_and_history() {
    let app = common::create_test_app();
    let (_, token) = common::register_partner(&app, "Anna").await;
    let link = common::create_link(&app, &token, "summer", "alixia.ch").await;
    let id = link["id"].as_str().unwrap();

    let now = Utc::now();
    for age in [Duration::days(45), Duration::days(10), Duration::hours(1)] {
        app.store
            .insert_click_at(NewClick::for_link(id), now - age)
            .await
            .unwrap();
    }

    let all = app
        .server
        .get("/api/stats")
        .add_query_param("linkId", id)
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();

    assert_eq!(all["clicks"], 3);
    // The 45-day-old click is outside the 30-day history.
    assert_eq!(all["clickHistory"].as_array().unwrap().len(), 2);

    let windowed = app
        .server
        .get("/api/stats")
        .add_query_param("linkId", id)
        .add_query_param("from", rfc3339(now - Duration::days(20)))
        .add_query_param("to", rfc3339(now - Duration::days(1)))
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();

    assert_eq!(windowed["clicks"], 1);
}

#[tokio::test]
async fn test_empty_query_values_are_ignored() {
    let app = common::create_test_app();
    let (_, token) = common::register_partner(&app, "Anna").await;

    let response = app
        .server
        .get("/api/stats?linkId=&from=&to=")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["totalClicks"], 0);
}

#[tokio::test]
async fn test_inverted_window_is_rejected() {
    let app = common::create_test_app();
    let (_, token) = common::register_partner(&app, "Anna").await;
    let now = Utc::now();

    let response = app
        .server
        .get("/api/stats")
        .add_query_param("from", rfc3339(now))
        .add_query_param("to", rfc3339(now - Duration::days(1)))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_malformed_timestamp_uses_error_envelope() {
    let app = common::create_test_app();
    let (_, token) = common::register_partner(&app, "Anna").await;
    let (_, admin) = common::insert_admin(&app).await;

    for (path, token) in [("/api/stats", &token), ("/api/admin/stats", &admin)] {
        let response = app
            .server
            .get(path)
            .add_query_param("from", "yesterday")
            .add_header("Authorization", common::bearer(token))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["message"], "Invalid query parameters");
        assert!(body["error"]["details"]["reason"].is_string());
    }
}

#[tokio::test]
async fn test_stats_for_foreign_link_is_not_found() {
    let app = common::create_test_app();
    let (_, anna) = common::register_partner(&app, "Anna").await;
    let (_, ben) = common::register_partner(&app, "Ben").await;
    let link = common::create_link(&app, &anna, "summer", "alixia.ch").await;

    app.server
        .get("/api/stats")
        .add_query_param("linkId", link["id"].as_str().unwrap())
        .add_header("Authorization", common::bearer(&ben))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_admin_can_read_any_link_stats() {
    let app = common::create_test_app();
    let (_, anna) = common::register_partner(&app, "Anna").await;
    let (_, admin) = common::insert_admin(&app).await;
    let link = common::create_link(&app, &anna, "summer", "alixia.ch").await;

    let response = app
        .server
        .get("/api/stats")
        .add_query_param("linkId", link["id"].as_str().unwrap())
        .add_header("Authorization", common::bearer(&admin))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["clicks"], 0);
}
