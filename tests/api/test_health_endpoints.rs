// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health endpoint tests
//!
//! These tests verify that:
//! - GET /health returns 200 with the loaded model id
//! - GET /healthz returns 200 with exactly {"ok": true}
//! - The health routes only answer GET
//! - Unknown routes return 404

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use fabstir_embedder_node::api::http_server::create_app;
use fabstir_embedder_node::embeddings::MockEmbedder;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

fn test_app() -> Router {
    create_app(Arc::new(MockEmbedder::new("all-MiniLM-L6-v2", 384)))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// GET /health reports readiness and the loaded model id.
#[tokio::test]
async fn test_health_returns_ok_and_model() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], serde_json::json!(true));
    assert_eq!(json["model"], serde_json::json!("all-MiniLM-L6-v2"));
}

/// GET /healthz is the bare liveness probe: body is exactly {"ok": true},
/// with no model field.
#[tokio::test]
async fn test_healthz_returns_bare_ok() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "ok": true }));
}

/// Health routes answer GET only.
#[tokio::test]
async fn test_health_rejects_post() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.status(),
        StatusCode::METHOD_NOT_ALLOWED,
        "POST to /health should be rejected"
    );
}

/// Routes outside the three registered ones do not exist.
#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/embed")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
