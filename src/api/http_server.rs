// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Router assembly and server startup

use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

use super::embed::embed_handler;
use super::handlers::{health_handler, healthz_handler};
use crate::embeddings::TextEmbedder;

/// Shared state handed to every route.
///
/// The embedding capability sits behind a trait object so tests can swap
/// in mocks without touching the router.
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn TextEmbedder>,
}

/// Builds the application router.
///
/// Kept separate from [`start_server`] so tests can drive the exact
/// production routing through `tower::ServiceExt` without binding a
/// socket.
pub fn create_app(embedder: Arc<dyn TextEmbedder>) -> Router {
    let state = AppState { embedder };

    Router::new()
        // Readiness, reports the loaded model
        .route("/health", get(health_handler))
        // Bare liveness
        .route("/healthz", get(healthz_handler))
        // Embedding endpoint
        .route("/embed", post(embed_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds `addr` and serves requests until the task is cancelled.
///
/// Connect info is attached so handlers can log the caller's address.
pub async fn start_server(addr: SocketAddr, embedder: Arc<dyn TextEmbedder>) -> anyhow::Result<()> {
    let app = create_app(embedder);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
