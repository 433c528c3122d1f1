// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health endpoints and their response type

use crate::api::http_server::AppState;
use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::info;

/// Body for both health endpoints.
///
/// `/health` fills `model` with the loaded model id; `/healthz` leaves it
/// out entirely, so the liveness body stays `{"ok": true}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// GET /health handler.
///
/// Readiness: a 200 here means the model finished loading, because the
/// server only starts after a successful load. Logs the caller for
/// operator visibility.
pub async fn health_handler(
    State(state): State<AppState>,
    origin: Option<ConnectInfo<SocketAddr>>,
) -> Json<HealthStatus> {
    let origin = origin
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    info!("Health check from {}", origin);

    Json(HealthStatus {
        ok: true,
        model: Some(state.embedder.model_name().to_string()),
    })
}

/// GET /healthz handler. Bare liveness probe for platform health checks;
/// intentionally unlogged so probes do not flood the log.
pub async fn healthz_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        ok: true,
        model: None,
    })
}
