// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! POST /embed HTTP handler
//!
//! Accepts `{"text": ...}`, runs it through the embedding capability and
//! returns `{"vector": [...]}`. Request text is never written to the log;
//! log lines carry a SHA-256 fingerprint and a short flattened preview
//! instead, so requests can be correlated without storing content.

use crate::api::embed::{EmbedRequest, EmbedResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use axum::extract::{ConnectInfo, State};
use axum::Json;
use sha2::{Digest, Sha256};
use std::net::SocketAddr;
use tracing::{error, info};

/// Preview length in characters, not bytes.
const PREVIEW_CHARS: usize = 100;

/// POST /embed handler.
///
/// # Request Body
/// ```json
/// { "text": "some input" }
/// ```
///
/// # Response Body
/// ```json
/// { "vector": [0.0132, -0.0841, ...] }
/// ```
///
/// Embedding failures become a 500 with `{"detail": "<error>"}`. Bodies
/// that are not JSON, or are missing `text`, are rejected by the `Json`
/// extractor with a 4xx before this function runs.
pub async fn embed_handler(
    State(state): State<AppState>,
    origin: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<EmbedRequest>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let text_hash = text_fingerprint(&request.text);
    let origin = origin
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    info!(
        "[EMBED_START] from {} | text_length: {} | sha256: {} | preview: '{}...'",
        origin,
        request.text.len(),
        text_hash,
        text_preview(&request.text)
    );

    let outcome = state
        .embedder
        .embed(std::slice::from_ref(&request.text))
        .await
        .map_err(ApiError::from)
        .and_then(|vectors| {
            // One text in, so exactly one vector comes back.
            vectors.into_iter().next().ok_or_else(|| {
                ApiError::Internal("embedding capability returned no vector".to_string())
            })
        });

    match outcome {
        Ok(vector) => {
            info!(
                "[EMBED_SUCCESS] text_length: {} | vector_dim: {} | sha256: {}",
                request.text.len(),
                vector.len(),
                text_hash
            );
            Ok(Json(EmbedResponse::new(vector)))
        }
        Err(error) => {
            error!(
                "[EMBED_FAILED] text_length: {} | sha256: {} | error: {}",
                request.text.len(),
                text_hash,
                error
            );
            Err(error)
        }
    }
}

/// Hex SHA-256 of the input text. Lets operators correlate log lines for
/// the same input without the log ever containing the input itself.
pub fn text_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// First [`PREVIEW_CHARS`] characters of the text with newlines flattened
/// to spaces and carriage returns dropped, so the preview stays on one
/// log line.
pub fn text_preview(text: &str) -> String {
    text.chars()
        .take(PREVIEW_CHARS)
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}
