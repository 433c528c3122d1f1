// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Service configuration
//!
//! Everything is read from environment variables once at startup;
//! unset or unparseable values fall back to defaults that serve the
//! stock 384-dimension MiniLM model.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_MODEL_FILE: &str = "onnx/model.onnx";
const DEFAULT_TOKENIZER_FILE: &str = "tokenizer.json";
const DEFAULT_DIMENSION: usize = 384;
const DEFAULT_MAX_LENGTH: usize = 256;

/// Runtime configuration for the embedder service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds.
    pub listen_addr: SocketAddr,
    /// Hub model id to serve.
    pub model_id: String,
    /// Weights file inside the model repo (or `model_dir`).
    pub model_file: String,
    /// Tokenizer file inside the model repo (or `model_dir`).
    pub tokenizer_file: String,
    /// Directory with pre-downloaded model files. When set, the Hub is
    /// never contacted.
    pub model_dir: Option<PathBuf>,
    /// Expected output dimensionality; startup fails on a mismatch.
    pub dimension: usize,
    /// Tokenizer truncation length in tokens.
    pub max_length: usize,
}

impl ServiceConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_listen_addr),
            model_id: env::var("EMBED_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            model_file: env::var("EMBED_MODEL_FILE")
                .unwrap_or_else(|_| DEFAULT_MODEL_FILE.to_string()),
            tokenizer_file: env::var("EMBED_TOKENIZER_FILE")
                .unwrap_or_else(|_| DEFAULT_TOKENIZER_FILE.to_string()),
            model_dir: env::var("EMBED_MODEL_DIR").ok().map(PathBuf::from),
            dimension: env::var("EMBED_DIMENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DIMENSION),
            max_length: env::var("EMBED_MAX_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_LENGTH),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            tokenizer_file: DEFAULT_TOKENIZER_FILE.to_string(),
            model_dir: None,
            dimension: DEFAULT_DIMENSION,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
