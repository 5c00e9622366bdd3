use serde_json::Value;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn liveness_is_always_ok() {
    let app = TestApp::spawn_without_database().await;

    let res = app.get("/health").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn db_probe_succeeds_with_a_database() {
    let app = TestApp::spawn().await;

    let res = app.get("/health/db").await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "ok");
}

#[tokio::test]
async fn db_probe_reports_missing_database() {
    let app = TestApp::spawn_without_database().await;

    let res = app.get("/health/db").await;

    assert_eq!(res.status, 503);
    assert_eq!(res.body["status"], "unconfigured");
}

#[tokio::test]
async fn env_report_lists_presence_without_values() {
    let app = TestApp::spawn_without_database().await;

    let res = app.get("/health/env").await;

    assert_eq!(res.status, 200);
    let settings = res.body["settings"].as_array().unwrap();
    let lookup = |name: &str| -> Value {
        settings
            .iter()
            .find(|s| s["name"] == name)
            .map(|s| s["set"].clone())
            .unwrap_or(Value::Null)
    };
    assert_eq!(lookup("CMS__DATABASE__URL"), false);
    assert_eq!(lookup("CMS__AUTH__JWT_SECRET"), true);
    assert_eq!(lookup("CMS__STORAGE__PUBLIC_BASE_URL"), true);
    assert!(!res.text.contains("test-secret-for-integration-tests"));
}

mod degraded {
    use super::*;

    #[tokio::test]
    async fn reads_return_empty_results() {
        let app = TestApp::spawn_without_database().await;

        let res = app.get(routes::PROGRAMS).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body, serde_json::json!([]));

        let res = app.get(routes::HERO_PUBLIC).await;
        assert_eq!(res.status, 200);
        assert!(res.body.is_null());

        let res = app.get(routes::MEDIA).await;
        assert_eq!(res.body, serde_json::json!([]));

        let res = app.get(routes::STATS).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["team"]["total"], 0);
    }

    #[tokio::test]
    async fn writes_report_not_configured() {
        let app = TestApp::spawn_without_database().await;

        let res = app
            .post_without_token(routes::HERO, &serde_json::json!({"title": "Welcome"}))
            .await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn swagger_document_is_served() {
        let app = TestApp::spawn_without_database().await;

        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        assert!(res.body["paths"]["/api/v1/hero/public"].is_object());
    }
}
