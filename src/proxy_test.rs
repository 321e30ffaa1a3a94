use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, Request};
use axum::routing::post;
use tower::ServiceExt;

use super::*;
use crate::config::Config;

fn state_for(backend_url: &str) -> AppState {
    AppState::new(Config {
        bind_addr: [127, 0, 0, 1].into(),
        port: 0,
        backend_url: backend_url.to_string(),
        backend_timeout: Duration::from_secs(2),
    })
    .unwrap()
}

/// Fake booking backend on an ephemeral port.
async fn spawn_backend() -> String {
    let backend = Router::new().route(
        "/api/auth/logout",
        post(|headers: HeaderMap| async move {
            let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();
            if auth == "Bearer tok-1" {
                (StatusCode::OK, axum::Json(serde_json::json!({ "success": true })))
            } else {
                (StatusCode::UNAUTHORIZED, axum::Json(serde_json::json!({ "success": false, "message": auth })))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, backend).await.unwrap() });
    format!("http://{addr}")
}

fn app(state: AppState) -> Router {
    Router::new().route("/api/{*rest}", axum::routing::any(forward)).with_state(state)
}

#[test]
fn upstream_url_keeps_path_and_query() {
    assert_eq!(upstream_url("http://b:5000", "/api/trips", Some("from=Dakar")), "http://b:5000/api/trips?from=Dakar");
    assert_eq!(upstream_url("http://b:5000", "/api/trips", Some("")), "http://b:5000/api/trips");
    assert_eq!(upstream_url("http://b:5000", "/api/trips", None), "http://b:5000/api/trips");
}

#[test]
fn forwardable_headers_drop_hop_by_hop() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::HOST, HeaderValue::from_static("front.test"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));

    let kept = forwardable_headers(&headers);
    assert_eq!(kept.len(), 2);
    assert!(kept.contains_key(header::AUTHORIZATION));
    assert!(kept.contains_key(header::CONTENT_TYPE));
}

#[test]
fn proxy_error_statuses() {
    assert_eq!(ProxyError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(ProxyError::Upstream("refused".into()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(ProxyError::Body("too big".into()).status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn forward_passes_bearer_token_and_status_through() {
    let backend = spawn_backend().await;
    let router = app(state_for(&backend));

    let ok = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/logout")
                .header(header::AUTHORIZATION, "Bearer tok-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let denied = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/auth/logout")
                .header(header::AUTHORIZATION, "Bearer stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(denied.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Bearer stale");
}

#[tokio::test]
async fn unreachable_backend_yields_bad_gateway_envelope() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = app(state_for(&format!("http://{addr}")))
        .oneshot(Request::builder().method(Method::POST).uri("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().starts_with("backend unreachable"));
}
