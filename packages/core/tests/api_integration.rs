//! Integration tests for the API process.
//!
//! Each test boots the full Axum router (same assembly as `main.rs`) using
//! `tower::ServiceExt::oneshot` — no live server needed. `build_test_app()`
//! wires an in-memory SQLite pool, the Prometheus registry, and the complete
//! router with CORS and the request-tracking middleware.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pulseboard::{
    api::{create_api_router, ApiState},
    config::Config,
    db,
    metrics::AppMetrics,
};

// ---- Helpers ----------------------------------------------------------------

fn test_config() -> Config {
    Config {
        app_name: "pulseboard".into(),
        app_version: "0.1.0".into(),
        environment: "test".into(),
        api_host: "127.0.0.1".into(),
        api_port: 8000,
        api_prefix: "/api/v1".into(),
        dashboard_host: "127.0.0.1".into(),
        dashboard_port: 8501,
        database_url: "sqlite::memory:".into(),
        allowed_origins: vec!["http://localhost:8501".into()],
        log_level: "info".into(),
        metrics_enabled: true,
        client_cache_ttl_seconds: 30,
    }
}

async fn build_test_app() -> Router {
    build_app_with_config(test_config()).await
}

async fn build_app_with_config(config: Config) -> Router {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let state = ApiState::new(
        Arc::new(config),
        Arc::new(pool),
        Arc::new(AppMetrics::new().unwrap()),
    );
    create_api_router(state)
}

/// Build an app whose database probe always fails (pool closed up front).
async fn build_app_with_dead_database() -> Router {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    pool.close().await;
    let state = ApiState::new(
        Arc::new(test_config()),
        Arc::new(pool),
        Arc::new(AppMetrics::new().unwrap()),
    );
    create_api_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ---- GET /api/v1/health -----------------------------------------------------

#[tokio::test]
async fn health_returns_200_healthy() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn health_trailing_slash_also_matches() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/api/v1/health/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn health_includes_version_environment_and_uptime() {
    let app = build_test_app().await;
    let (_, json) = get(app, "/api/v1/health").await;

    assert_eq!(json["version"], "0.1.0");
    assert_eq!(json["environment"], "test");
    assert!(json["timestamp"].is_string());
    assert!(json["uptime"].as_str().unwrap().ends_with('s'));
}

// ---- GET /api/v1/health/detailed --------------------------------------------

#[tokio::test]
async fn detailed_health_is_healthy_with_live_database() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/api/v1/health/detailed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["services"]["database"]["status"], "healthy");
    assert_eq!(json["services"]["api"]["status"], "healthy");
}

#[tokio::test]
async fn detailed_health_is_unhealthy_when_database_is_down() {
    let app = build_app_with_dead_database().await;
    let (status, json) = get(app, "/api/v1/health/detailed").await;

    // Still a 200 — the body carries the verdict.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["services"]["database"]["status"], "unhealthy");
    assert_eq!(json["services"]["api"]["status"], "healthy");
}

#[tokio::test]
async fn basic_health_stays_healthy_when_database_is_down() {
    // The basic endpoint does not probe dependencies.
    let app = build_app_with_dead_database().await;
    let (status, json) = get(app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// ---- GET /api/v1/health/ready and /live -------------------------------------

#[tokio::test]
async fn readiness_probe_is_constant() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/api/v1/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
}

#[tokio::test]
async fn liveness_probe_is_constant() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/api/v1/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "alive");
}

#[tokio::test]
async fn probes_ignore_database_state() {
    let app = build_app_with_dead_database().await;

    let (status, json) = get(app.clone(), "/api/v1/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");

    let (status, json) = get(app, "/api/v1/health/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "alive");
}

// ---- GET / ------------------------------------------------------------------

#[tokio::test]
async fn root_returns_welcome_payload() {
    let app = build_test_app().await;
    let (status, json) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Welcome to pulseboard");
    assert_eq!(json["version"], "0.1.0");
    assert_eq!(json["health"], "/api/v1/health");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app().await;
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---- GET /metrics -----------------------------------------------------------

#[tokio::test]
async fn metrics_reflect_served_requests() {
    let app = build_test_app().await;

    // Drive one health request through the middleware first.
    let (status, _) = get(app.clone(), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("missing content-type header")
        .to_str()
        .unwrap();
    assert_eq!(ct, "text/plain; version=0.0.4");

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.contains("pulseboard_health_checks_total"));
    assert!(body.contains("pulseboard_http_requests_total"));
}

#[tokio::test]
async fn metrics_route_is_absent_when_disabled() {
    let mut config = test_config();
    config.metrics_enabled = false;
    let app = build_app_with_config(config).await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ---- CORS -------------------------------------------------------------------

#[tokio::test]
async fn allowed_origin_gets_cors_headers() {
    let app = build_test_app().await;
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header(header::ORIGIN, "http://localhost:8501")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let allow_origin = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("missing access-control-allow-origin")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:8501");
}

#[tokio::test]
async fn preflight_allows_configured_methods() {
    let app = build_test_app().await;
    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/v1/health")
                .header(header::ORIGIN, "http://localhost:8501")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let allow_methods = resp
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .expect("missing access-control-allow-methods")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("GET"));
    assert!(allow_methods.contains("DELETE"));
}
