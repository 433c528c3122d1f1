// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding API Module
//!
//! This module provides the POST /embed endpoint: one text in, one
//! fixed-dimension embedding vector out.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{embed_handler, text_fingerprint, text_preview};
pub use request::EmbedRequest;
pub use response::EmbedResponse;
