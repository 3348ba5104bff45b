mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_check_reports_healthy() {
    let app = common::create_test_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["checks"]["database"]["status"], "ok");
}
