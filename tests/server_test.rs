//! Router tests: every endpoint driven through `oneshot` against a stub
//! upstream.

#![cfg(feature = "server")]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use astra::server::{AppState, router};
use astra::{Astra, AstraError, QueryParams, RawPayload, Result, RetryConfig, SpaceDatabase};

const INDEX_HTML: &str = "<!doctype html><title>astra</title>";

struct StubDb {
    script: Mutex<VecDeque<Result<RawPayload>>>,
    fallback: RawPayload,
    calls: AtomicU32,
}

impl StubDb {
    fn returning(payload: RawPayload) -> Arc<Self> {
        Self::scripted(Vec::new(), payload)
    }

    fn scripted(script: Vec<Result<RawPayload>>, fallback: RawPayload) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpaceDatabase for StubDb {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch(&self, _endpoint: &str, _params: &QueryParams) -> Result<RawPayload> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(self.fallback.clone()),
        }
    }
}

fn planets() -> RawPayload {
    vec![
        json!({ "name": "Hot Jupiter", "radius_earth": 12.0, "mass_earth": 300.0 }),
        json!({
            "name": "Kepler-452b",
            "host_star": "Kepler-452",
            "radius_earth": 1.5,
            "mass_earth": 5.0,
            "orbital_period_days": 384.8,
            "classification": "Super-Earth"
        }),
    ]
}

/// Router over `db`, serving static files from a temp dir. The dir must
/// outlive the router.
fn app(db: Arc<StubDb>) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

    let service = Astra::builder()
        .upstream(db)
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();
    let app = router(AppState::new(Arc::new(service)), dir.path());
    (app, dir)
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Method::GET, uri).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

// =============================================================================
// Health and static content
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn health_answers_head() {
    let db = StubDb::returning(planets());
    let (app, _dir) = app(db.clone());

    let (status, _) = send(&app, Method::HEAD, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(db.calls(), 0);
}

#[tokio::test]
async fn root_serves_homepage() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = send(&app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn static_assets_are_served() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = send(&app, Method::GET, "/static/style.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body {}");
}

// =============================================================================
// /astra/exoplanets
// =============================================================================

#[tokio::test]
async fn exoplanets_are_ranked_and_scored() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/astra/exoplanets?limit=5").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Kepler-452b");
    assert_eq!(list[0]["host_star"], "Kepler-452");
    assert_eq!(list[0]["habitability_score"], 100);
    assert_eq!(list[1]["name"], "Hot Jupiter");
    assert_eq!(list[1]["host_star"], "Unknown");
    assert_eq!(list[1]["habitability_score"], 0);
}

#[tokio::test]
async fn exoplanets_default_limit_is_cached() {
    let db = StubDb::returning(planets());
    let (app, _dir) = app(db.clone());

    let (first, _) = get_json(&app, "/astra/exoplanets").await;
    let (second, _) = get_json(&app, "/astra/exoplanets?limit=20").await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(db.calls(), 1);
}

#[tokio::test]
async fn out_of_range_limit_is_rejected() {
    let db = StubDb::returning(planets());
    let (app, _dir) = app(db.clone());

    let (zero, body) = get_json(&app, "/astra/exoplanets?limit=0").await;
    let (huge, _) = get_json(&app, "/astra/exoplanets?limit=201").await;

    assert_eq!(zero, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(huge, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("limit"));
    assert_eq!(db.calls(), 0);
}

#[tokio::test]
async fn non_numeric_limit_is_bad_request() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, _) = send(&app, Method::GET, "/astra/exoplanets?limit=lots").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_upstream_is_gateway_timeout() {
    let db = StubDb::scripted(
        vec![Err(AstraError::UpstreamUnavailable {
            attempts: 3,
            cause: "timed out".into(),
        })],
        planets(),
    );
    let (app, _dir) = app(db);

    let (status, body) = get_json(&app, "/astra/exoplanets").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body["error"].as_str().unwrap().contains("30 seconds"));
}

#[tokio::test]
async fn upstream_api_failure_is_internal_error() {
    let db = StubDb::scripted(
        vec![Err(AstraError::Api {
            status: 502,
            message: "bad gateway".into(),
        })],
        planets(),
    );
    let (app, _dir) = app(db);

    let (status, body) = get_json(&app, "/astra/exoplanets").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// =============================================================================
// /astra/search and /object/:name
// =============================================================================

#[tokio::test]
async fn search_returns_ranked_matches() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/astra/search?q=kepler").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Kepler-452b");
    assert_eq!(body[0]["habitability_score"], 100);
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let db = StubDb::returning(planets());
    let (app, _dir) = app(db.clone());

    let (status, _) = send(&app, Method::GET, "/astra/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(db.calls(), 0);
}

#[tokio::test]
async fn blank_search_is_rejected() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, _) = get_json(&app, "/astra/search?q=%20%20").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn object_returns_first_match() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/object/Hot%20Jupiter").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Hot Jupiter");
    assert_eq!(body["habitability_score"], 0);
}

#[tokio::test]
async fn unknown_object_is_not_found() {
    let (app, _dir) = app(StubDb::returning(Vec::new()));

    let (status, body) = get_json(&app, "/object/Vulcan").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Vulcan"));
}

// =============================================================================
// /astra/raw and /suggestions
// =============================================================================

#[tokio::test]
async fn raw_returns_upstream_payload_verbatim() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/astra/raw?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(planets()));
}

#[tokio::test]
async fn suggestions_are_unscored() {
    let (app, _dir) = app(StubDb::returning(planets()));

    let (status, body) = get_json(&app, "/suggestions").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Hot Jupiter");
    assert!(list[0].get("habitability_score").is_none());
}
