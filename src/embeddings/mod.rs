// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text embedding capabilities for the embedder node
//!
//! This module provides:
//! - The `TextEmbedder` trait the HTTP layer depends on
//! - `OnnxEmbedder`: sentence-transformer inference via ONNX Runtime
//! - Hub download of model files by model id
//! - `MockEmbedder`/`FailingEmbedder` for tests and local development

pub mod hub;
pub mod mock;
pub mod onnx_model;

pub use hub::{fetch_model_files, ModelFiles};
pub use mock::{FailingEmbedder, MockEmbedder};
pub use onnx_model::OnnxEmbedder;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while producing embeddings.
///
/// Every failure from the capability is mapped to exactly one of these
/// variants; the API boundary converts any of them to a uniform HTTP 500.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("tokenization failed: {0}")]
    Tokenize(String),

    #[error("model inference failed: {0}")]
    Inference(#[from] ort::Error),

    #[error("unexpected tensor shape: {0}")]
    Shape(String),
}

/// An embedding capability: an ordered sequence of input strings in, an
/// ordered sequence of vectors of equal length out.
///
/// The request handler always supplies a single-element input and takes
/// the first (only) result. Implementations must be safe to share across
/// concurrent requests behind an `Arc`.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embeds each input text, preserving order.
    ///
    /// The returned outer vector has the same length as `texts`; every
    /// inner vector has the model's fixed dimensionality.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Identifier of the loaded model (e.g. a Hub model id).
    fn model_name(&self) -> &str;

    /// Fixed output dimensionality of the model.
    fn dimension(&self) -> usize;
}
