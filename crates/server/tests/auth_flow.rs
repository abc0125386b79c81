use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_extra::headers::{Authorization, HeaderMapExt};
use serde_json::{json, Value};
use tower::ServiceExt;

use configs::{AppConfig, DatabaseConfig, StoreBackend};
use server::startup::{build_app, build_state};
use server::state::ServerState;
use service::auth::hasher::mock::FakePasswordHasher;
use service::auth::repo::memory::InMemoryCredentialStore;
use service::tasks::repo::memory::InMemoryTaskStore;

fn memory_app() -> Router {
    let state = ServerState::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakePasswordHasher::default()),
        Arc::new(InMemoryTaskStore::new()),
    );
    build_app(state)
}

fn register_request(username: &str, password: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"username": username, "password": password}))?))?)
}

fn user_info_request(credentials: Option<(&str, &str)>) -> anyhow::Result<Request<Body>> {
    let mut req = Request::builder().method("GET").uri("/auth/get-user-info").body(Body::empty())?;
    if let Some((user, pass)) = credentials {
        req.headers_mut().typed_insert(Authorization::basic(user, pass));
    }
    Ok(req)
}

async fn json_body(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_register_returns_id_and_username_only() -> anyhow::Result<()> {
    let app = memory_app();

    let resp = app.clone().oneshot(register_request("bebra", "bebra")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await?;
    let obj = body.as_object().expect("json object");
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["id", "username"]);
    assert_eq!(body["username"], "bebra");
    Ok(())
}

#[tokio::test]
async fn test_register_long_username() -> anyhow::Result<()> {
    let app = memory_app();
    let long = "u".repeat(1024);

    let resp = app.clone().oneshot(register_request(&long, "pw")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.clone().oneshot(user_info_request(Some((&long, "pw")))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_username_rejected() -> anyhow::Result<()> {
    let app = memory_app();

    let resp = app.clone().oneshot(register_request("JohnDoe", "johndoe")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.clone().oneshot(register_request("JohnDoe", "password")?).await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(resp).await?, json!({"error": "registration failed"}));
    Ok(())
}

#[tokio::test]
async fn test_register_and_get_user_info_flow() -> anyhow::Result<()> {
    let app = memory_app();

    let resp = app.clone().oneshot(register_request("JohnDoe", "johndoe")?).await?;
    let registered = json_body(resp).await?;

    let resp = app.clone().oneshot(user_info_request(Some(("JohnDoe", "johndoe")))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let me = json_body(resp).await?;
    assert_eq!(me["id"], registered["id"]);
    assert_eq!(me["username"], "JohnDoe");
    Ok(())
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() -> anyhow::Result<()> {
    let app = memory_app();
    let _ = app.clone().oneshot(register_request("JohnDoe", "johndoe")?).await?;

    let wrong = app.clone().oneshot(user_info_request(Some(("JohnDoe", "bebra")))?).await?;
    let unknown = app.clone().oneshot(user_info_request(Some(("who", "bebra")))?).await?;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.headers().get(header::WWW_AUTHENTICATE), unknown.headers().get(header::WWW_AUTHENTICATE));
    assert_eq!(json_body(wrong).await?, json_body(unknown).await?);
    Ok(())
}

#[tokio::test]
async fn test_missing_or_malformed_authorization_is_unauthorized() -> anyhow::Result<()> {
    let app = memory_app();

    let resp = app.clone().oneshot(user_info_request(None)?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::WWW_AUTHENTICATE).is_some());

    let req = Request::builder()
        .method("GET")
        .uri("/auth/get-user-info")
        .header(header::AUTHORIZATION, "Bearer abc")
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let app = memory_app();

    let resp = app.clone().oneshot(Request::builder().uri("/health").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await?, json!({"status": "ok"}));

    let resp = app.clone().oneshot(Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await?;
    assert!(doc["paths"]["/auth/register"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_database_backed_state_from_config() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.store.backend = StoreBackend::Database;
    cfg.database = DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    cfg.hashing.memory_kib = Some(1024);
    cfg.hashing.iterations = Some(1);
    cfg.normalize_and_validate()?;

    let app = build_app(build_state(&cfg).await?);

    let resp = app.clone().oneshot(register_request("JohnDoe", "johndoe")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.clone().oneshot(register_request("JohnDoe", "other")?).await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = app.clone().oneshot(user_info_request(Some(("JohnDoe", "johndoe")))?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.clone().oneshot(user_info_request(Some(("JohnDoe", "wrong")))?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
