use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::Service;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

async fn build_app() -> anyhow::Result<Router> {
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "test-secret".into();
    let state = server::build_state(&cfg).await?;
    Ok(server::build_app(state))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    authz: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(a) = authz {
        builder = builder.header("authorization", a);
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_vec(&v)?),
        None => Body::empty(),
    };
    let resp = app.clone().call(builder.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn login(app: &Router) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/api/auth", None, Some(json!({"username": "test", "password": "1234"}))).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(body["access_token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn test_auth_wrong_method() -> anyhow::Result<()> {
    let app = build_app().await?;
    let creds = json!({"username": "test", "password": "1234"});

    let (status, body) = send(&app, "GET", "/api/auth", None, Some(creds.clone())).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Method GET not allowed for URL /api/auth");

    let (status, body) = send(&app, "DELETE", "/api/auth", None, Some(creds)).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Method DELETE not allowed for URL /api/auth");
    Ok(())
}

#[tokio::test]
async fn test_auth_rejects_every_non_post_method() -> anyhow::Result<()> {
    let app = build_app().await?;
    let creds = json!({"username": "test", "password": "1234"});

    for method in ["GET", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        let (status, body) = send(&app, method, "/api/auth", None, Some(creds.clone())).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method}");
        assert_eq!(body["message"], format!("Method {method} not allowed for URL /api/auth"));
    }

    // HEAD responses carry no body
    let (status, _) = send(&app, "HEAD", "/api/auth", None, None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn test_options_with_cors_headers_is_not_a_preflight() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/auth")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["message"], "Method OPTIONS not allowed for URL /api/auth");
    Ok(())
}

#[tokio::test]
async fn test_auth_wrong_user() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/api/auth", None, Some(json!({"username": "test_1", "password": "1234"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["User not found."]));
    Ok(())
}

#[tokio::test]
async fn test_auth_wrong_password() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/api/auth", None, Some(json!({"username": "test", "password": "12345"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["Password is incorrect."]));
    Ok(())
}

#[tokio::test]
async fn test_auth_missing_fields_and_bad_json() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/api/auth", None, Some(json!({"username": "test"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["Missing username or password."]));

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_auth_issues_token_usable_on_protected_routes() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = login(&app).await?;
    assert!(!token.is_empty());
    let bearer = format!("Bearer {token}");

    let (status, body) = send(&app, "GET", "/api/auth/verify", Some(&bearer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"valid": true}));

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&bearer), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"me": {"username": "test"}}));
    Ok(())
}

#[tokio::test]
async fn test_bad_tokens_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = login(&app).await?;

    let (status, body) = send(&app, "GET", "/api/auth/verify", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["Authorization header not present."]));

    let (status, body) = send(&app, "GET", "/api/poly", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["Authorization header is invalid."]));

    let tampered = format!("Bearer {token}x");
    let (status, body) = send(&app, "GET", "/api/poly", Some(&tampered), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["reasons"], json!(["Auth required."]));
    Ok(())
}

#[tokio::test]
async fn test_token_from_other_instance_rejected() -> anyhow::Result<()> {
    let app = build_app().await?;

    let mut other_cfg = AppConfig::default();
    other_cfg.auth.jwt_secret = "another-secret".into();
    let other = server::build_app(server::build_state(&other_cfg).await?);
    let foreign = login(&other).await?;

    let (status, _) = send(&app, "GET", "/api/poly", Some(&format!("Bearer {foreign}")), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_public_routes() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/poly"].is_object());

    let (status, body) = send(&app, "GET", "/nowhere", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Requested URL /nowhere not found");
    Ok(())
}

#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn test_rejected_token_logs_one_warning() -> anyhow::Result<()> {
    let app = build_app().await?;
    let token = login(&app).await?;

    let counter = WarnCounter::default();
    let _guard = tracing_subscriber::registry().with(counter.clone()).set_default();

    for authz in [None, Some(token.clone()), Some(format!("Bearer {token}x"))] {
        let before = counter.0.load(Ordering::SeqCst);
        let (status, _) = send(&app, "GET", "/api/poly", authz.as_deref(), None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(counter.0.load(Ordering::SeqCst) - before, 1, "{authz:?}");
    }
    Ok(())
}
