// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX model tests
//!
//! Most tests here need real model files on disk and are ignored by
//! default; run them with `cargo test -- --ignored` after downloading
//! the all-MiniLM-L6-v2 ONNX export to ./models/all-MiniLM-L6-v2-onnx/
//! (or point EMBED_MODEL_DIR elsewhere).

use fabstir_embedder_node::embeddings::{ModelFiles, OnnxEmbedder, TextEmbedder};
use std::path::PathBuf;

const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

fn local_model_files() -> ModelFiles {
    let dir = std::env::var("EMBED_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./models/all-MiniLM-L6-v2-onnx"));

    ModelFiles {
        model: dir.join("model.onnx"),
        tokenizer: dir.join("tokenizer.json"),
    }
}

fn load_model() -> OnnxEmbedder {
    OnnxEmbedder::load(MODEL_NAME, &local_model_files(), 384, 256)
        .expect("failed to load ONNX model; see module docs for setup")
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (na * nb)
}

/// Loading from paths that do not exist fails with an error instead of
/// panicking; startup treats that as fatal.
#[tokio::test]
async fn test_load_fails_on_missing_files() {
    let files = ModelFiles {
        model: PathBuf::from("/nonexistent/model.onnx"),
        tokenizer: PathBuf::from("/nonexistent/tokenizer.json"),
    };

    let result = OnnxEmbedder::load(MODEL_NAME, &files, 384, 256);
    assert!(result.is_err(), "missing model files must fail the load");
}

/// Model loads and reports its identity and dimensionality.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_model_loads_and_reports_metadata() {
    let model = load_model();

    assert_eq!(model.model_name(), MODEL_NAME);
    assert_eq!(model.dimension(), 384);
}

/// A single text embeds to exactly 384 finite components.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_embed_single_returns_384_dims() {
    let model = load_model();

    let vectors = model.embed(&["Hello world".to_string()]).await.unwrap();

    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].len(), 384);
    assert!(vectors[0].iter().all(|v| v.is_finite()));
}

/// Output vectors are L2-normalized.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_embeddings_are_normalized() {
    let model = load_model();

    let vectors = model
        .embed(&["normalization check".to_string()])
        .await
        .unwrap();
    let magnitude = vectors[0].iter().map(|x| x * x).sum::<f32>().sqrt();

    assert!(
        (magnitude - 1.0).abs() < 0.01,
        "expected unit vector, got magnitude {}",
        magnitude
    );
}

/// Same input, same vector: CPU inference is deterministic.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_embedding_is_deterministic() {
    let model = load_model();
    let text = vec!["determinism check".to_string()];

    let first = model.embed(&text).await.unwrap();
    let second = model.embed(&text).await.unwrap();

    assert_eq!(first, second);
}

/// The empty string is valid input and produces a full-size vector.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_empty_string_embeds() {
    let model = load_model();

    let vectors = model.embed(&[String::new()]).await.unwrap();

    assert_eq!(vectors[0].len(), 384);
    assert!(vectors[0].iter().all(|v| v.is_finite()));
}

/// Related sentences land closer together than unrelated ones.
#[tokio::test]
#[ignore] // Requires model files on disk
async fn test_semantic_similarity_sanity() {
    let model = load_model();

    let vectors = model
        .embed(&[
            "The cat sat on the mat".to_string(),
            "A cat is sitting on a rug".to_string(),
            "Quarterly revenue exceeded projections".to_string(),
        ])
        .await
        .unwrap();

    let related = cosine(&vectors[0], &vectors[1]);
    let unrelated = cosine(&vectors[0], &vectors[2]);

    assert!(
        related > unrelated,
        "related pair ({}) should beat unrelated pair ({})",
        related,
        unrelated
    );
}
