// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model file resolution
//!
//! Resolves the ONNX weights and tokenizer for a model id, either from
//! explicit local paths or from the Hugging Face Hub (downloaded on first
//! run, served from the local cache afterwards).

use anyhow::{Context, Result};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::{Path, PathBuf};
use tracing::info;

/// Local paths to the files an [`OnnxEmbedder`](super::OnnxEmbedder)
/// loads from.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    /// ONNX model weights.
    pub model: PathBuf,
    /// Tokenizer definition (tokenizer.json).
    pub tokenizer: PathBuf,
}

/// Resolves model files for `model_id`.
///
/// When `local_dir` is set, the files are expected at
/// `<local_dir>/<model_file>` and `<local_dir>/<tokenizer_file>` and no
/// network access happens. Otherwise both files are fetched from the Hub
/// repo named by `model_id`.
///
/// # Errors
/// Fails when a local file is missing or a Hub download fails. Callers
/// treat this as fatal: without model files there is nothing to serve.
pub fn fetch_model_files(
    model_id: &str,
    model_file: &str,
    tokenizer_file: &str,
    local_dir: Option<&Path>,
) -> Result<ModelFiles> {
    if let Some(dir) = local_dir {
        let model = dir.join(model_file);
        let tokenizer = dir.join(tokenizer_file);

        for path in [&model, &tokenizer] {
            if !path.exists() {
                anyhow::bail!("model file not found: {}", path.display());
            }
        }

        info!("using local model files from {}", dir.display());
        return Ok(ModelFiles { model, tokenizer });
    }

    info!("fetching model files for {} from the Hub", model_id);

    let api = Api::new().context("failed to initialize Hub client")?;
    let repo = Repo::new(model_id.to_string(), RepoType::Model);

    let model = api
        .repo(repo.clone())
        .get(model_file)
        .with_context(|| format!("failed to fetch {} from {}", model_file, model_id))?;
    let tokenizer = api
        .repo(repo)
        .get(tokenizer_file)
        .with_context(|| format!("failed to fetch {} from {}", tokenizer_file, model_id))?;

    Ok(ModelFiles { model, tokenizer })
}
