// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use fabstir_embedder_node::{
    api::http_server,
    config::ServiceConfig,
    embeddings::{fetch_model_files, OnnxEmbedder, TextEmbedder},
};
use std::{env, sync::Arc};
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Fabstir Embedder Node...\n");
    println!("📦 BUILD VERSION: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = ServiceConfig::from_env();

    // Resolve and load the model before binding the listener. A node
    // that cannot embed must not answer health checks, so any failure
    // here exits instead of serving degraded.
    println!("🧠 Loading embedding model: {}", config.model_id);

    let files = fetch_model_files(
        &config.model_id,
        &config.model_file,
        &config.tokenizer_file,
        config.model_dir.as_deref(),
    )?;

    let embedder = OnnxEmbedder::load(
        &config.model_id,
        &files,
        config.dimension,
        config.max_length,
    )?;

    println!("✅ Model loaded ({} dimensions)", embedder.dimension());
    tracing::info!("Embedder service started with model: {}", config.model_id);

    let separator = "=".repeat(60);
    println!("\n{}", separator);
    println!("🎉 Fabstir Embedder Node is running!");
    println!("{}", separator);
    println!("Model:          {}", config.model_id);
    println!("Dimensions:     {}", embedder.dimension());
    println!("Listen address: {}", config.listen_addr);
    println!("\nAPI Endpoints:");
    println!("  Health:       http://{}/health", config.listen_addr);
    println!("  Liveness:     http://{}/healthz", config.listen_addr);
    println!("  Embed:        POST http://{}/embed", config.listen_addr);
    println!("\nTest with curl:");
    println!("  curl -X POST http://{}/embed \\", config.listen_addr);
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"text\": \"hello world\"}}'");
    println!("\nPress Ctrl+C to shutdown...");
    println!("{}\n", separator);

    let embedder: Arc<dyn TextEmbedder> = Arc::new(embedder);

    tokio::select! {
        result = http_server::start_server(config.listen_addr, embedder) => result?,
        _ = signal::ctrl_c() => {
            println!("\n⏹️  Shutting down...");
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}
