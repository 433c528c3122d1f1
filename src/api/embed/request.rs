// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! EmbedRequest type for the POST /embed endpoint

use serde::{Deserialize, Serialize};

/// Request body for POST /embed.
///
/// # Fields
/// - `text`: the string to embed. Required. The empty string is valid
///   input; a body without `text` (or with a non-string value) is
///   rejected by the JSON extractor before the handler runs.
///
/// Unknown extra fields are ignored.
///
/// # Example
/// ```json
/// { "text": "what is the purpose of the aggregator" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedRequest {
    /// Text to embed.
    pub text: String,
}
