// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX embedding model wrapper
//!
//! Runs a sentence-transformer ONNX export through ONNX Runtime:
//! tokenize, forward pass, attention-weighted mean pooling over the token
//! embeddings, L2 normalization. The default model (all-MiniLM-L6-v2)
//! produces 384-dimensional vectors.

use anyhow::{Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::sync::Arc;
use tokenizers::{Tokenizer, TruncationParams};
use tokio::sync::Mutex;
use tracing::info;

use super::hub::ModelFiles;
use super::{EmbeddingError, TextEmbedder};

/// Sentence-transformer embedding model backed by ONNX Runtime.
///
/// The session is built once at startup and shared read-only across
/// requests; ONNX Runtime needs exclusive access per inference, so runs
/// are serialized behind an async mutex. Output dimensionality is
/// validated with a probe inference at load time, before the server
/// starts accepting requests.
#[derive(Clone)]
pub struct OnnxEmbedder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
    max_length: usize,
}

impl std::fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbedder")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

impl OnnxEmbedder {
    /// Loads the model and tokenizer from disk and probes the output
    /// dimensionality.
    ///
    /// # Errors
    /// Fails if the session cannot be built, the tokenizer file is
    /// invalid, or the probe inference does not produce `dimension`
    /// components. A failure here must abort startup: the process serves
    /// no requests without a working model.
    pub fn load(
        model_name: impl Into<String>,
        files: &ModelFiles,
        dimension: usize,
        max_length: usize,
    ) -> Result<Self> {
        let model_name = model_name.into();

        info!(
            "loading ONNX embedding model {} from {}",
            model_name,
            files.model.display()
        );

        let mut session = Session::builder()
            .context("failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("failed to set optimization level")?
            .with_intra_threads(4)
            .context("failed to set intra-op threads")?
            .commit_from_file(&files.model)
            .with_context(|| format!("failed to load ONNX model from {}", files.model.display()))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| anyhow::anyhow!("failed to load tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("failed to configure truncation: {e}"))?;

        // Probe once so a model with the wrong output shape fails the
        // whole startup instead of the first request.
        let probe = encode(&tokenizer, "dimension probe")?;
        let vector = embedding_pass(&mut session, &probe.0, &probe.1)?;
        if vector.len() != dimension {
            anyhow::bail!(
                "model {} produced {}-dimensional vectors (expected {})",
                model_name,
                vector.len(),
                dimension
            );
        }

        info!(
            "embedding model ready: {} ({} dimensions, inputs truncated at {} tokens)",
            model_name, dimension, max_length
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension,
            max_length,
        })
    }

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let (ids, mask) = encode(&self.tokenizer, text)?;

        let mut session = self.session.lock().await;
        let vector = embedding_pass(&mut session, &ids, &mask)?;

        if vector.len() != self.dimension {
            return Err(EmbeddingError::Shape(format!(
                "got {} components, expected {}",
                vector.len(),
                self.dimension
            )));
        }

        Ok(vector)
    }
}

#[async_trait]
impl TextEmbedder for OnnxEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed_text(text).await?);
        }
        Ok(vectors)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn encode(tokenizer: &Tokenizer, text: &str) -> Result<(Vec<i64>, Vec<i64>), EmbeddingError> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| EmbeddingError::Tokenize(e.to_string()))?;

    let ids = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let mask = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();

    Ok((ids, mask))
}

/// Runs one forward pass for a single tokenized input and reduces the
/// token-level output to a sentence embedding.
///
/// Sentence-transformer exports emit token embeddings with shape
/// `[batch, seq_len, hidden]`; the sentence vector is the mean over
/// non-padding tokens, L2-normalized.
fn embedding_pass(
    session: &mut Session,
    ids: &[i64],
    mask: &[i64],
) -> Result<Vec<f32>, EmbeddingError> {
    let seq_len = ids.len();
    let token_type_ids = vec![0i64; seq_len];

    let input_ids = Array2::from_shape_vec((1, seq_len), ids.to_vec())
        .map_err(|e| EmbeddingError::Shape(e.to_string()))?;
    let attention_mask = Array2::from_shape_vec((1, seq_len), mask.to_vec())
        .map_err(|e| EmbeddingError::Shape(e.to_string()))?;
    let token_type_ids = Array2::from_shape_vec((1, seq_len), token_type_ids)
        .map_err(|e| EmbeddingError::Shape(e.to_string()))?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids)?,
        "attention_mask" => Value::from_array(attention_mask)?,
        "token_type_ids" => Value::from_array(token_type_ids)?
    ])?;

    // Index rather than name: output names vary between exports.
    let output = outputs[0].try_extract_array::<f32>()?;
    let shape = output.shape();
    if shape.len() != 3 {
        return Err(EmbeddingError::Shape(format!(
            "expected [batch, seq_len, hidden] output, got {:?}",
            shape
        )));
    }

    let tokens = output.index_axis(Axis(0), 0);
    let hidden = tokens.shape()[1];

    // Mean pooling weighted by the attention mask, so padding tokens do
    // not dilute the sentence vector.
    let mut pooled = vec![0.0f32; hidden];
    let mut mask_total = 0.0f32;
    for (i, &m) in mask.iter().enumerate().take(tokens.shape()[0]) {
        let weight = m as f32;
        mask_total += weight;
        for (j, value) in pooled.iter_mut().enumerate() {
            *value += tokens[[i, j]] * weight;
        }
    }
    for value in &mut pooled {
        *value /= mask_total.max(1e-9);
    }

    l2_normalize(&mut pooled);

    Ok(pooled)
}

/// Scales a vector to unit length. Leaves the zero vector untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
