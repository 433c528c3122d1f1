// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Mock embedders for tests and model-free local runs

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::onnx_model::l2_normalize;
use super::{EmbeddingError, TextEmbedder};

/// Deterministic pseudo-embedder.
///
/// Produces vectors seeded from a hash of the input text, so identical
/// text always embeds to the identical vector and distinct texts to
/// distinct vectors. No model files needed; drives the endpoint tests
/// and `mock` mode.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    model_name: String,
    dimension: usize,
    normalize: bool,
}

impl MockEmbedder {
    pub fn new(model_name: impl Into<String>, dimension: usize) -> Self {
        Self {
            model_name: model_name.into(),
            dimension,
            normalize: true,
        }
    }

    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn generate(&self, text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);

        // Linear congruential generator keyed on the text hash.
        let mut current_seed = seed;
        for i in 0..self.dimension {
            current_seed =
                (current_seed.wrapping_mul(1664525).wrapping_add(1013904223)) ^ (i as u64);

            // Map to [-1, 1].
            let value = (current_seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            embedding.push(value as f32);
        }

        if self.normalize {
            l2_normalize(&mut embedding);
        }

        embedding
    }
}

#[async_trait]
impl TextEmbedder for MockEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.generate(text)).collect())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Embedder that fails every call. Drives the error-path tests.
#[derive(Debug, Clone)]
pub struct FailingEmbedder {
    message: String,
}

impl FailingEmbedder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Shape(self.message.clone()))
    }

    fn model_name(&self) -> &str {
        "failing-mock"
    }

    fn dimension(&self) -> usize {
        0
    }
}
