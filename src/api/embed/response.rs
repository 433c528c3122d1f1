// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedResponse type for the POST /embed endpoint

use serde::{Deserialize, Serialize};

/// Response body for POST /embed.
///
/// # Fields
/// - `vector`: the embedding, one f32 per component, in model order.
///   Length always equals the loaded model's dimensionality (384 for the
///   default model).
///
/// # Example
/// ```json
/// { "vector": [0.0132, -0.0841, 0.0277, ...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Embedding vector.
    pub vector: Vec<f32>,
}

impl EmbedResponse {
    pub fn new(vector: Vec<f32>) -> Self {
        Self { vector }
    }
}
