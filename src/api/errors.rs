// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! API error types and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// Error payload returned to clients: `{"detail": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Errors a request handler can surface.
///
/// All of them map to a plain 500 with the error text in `detail`.
/// Malformed request bodies never get this far: axum's `Json` extractor
/// rejects them with its own 4xx before the handler runs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Embedding(#[from] EmbeddingError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Embedding(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            detail: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), axum::response::Json(self.to_response())).into_response()
    }
}
