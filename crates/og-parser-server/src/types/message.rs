//! Request and response bodies for the parse API.

use og_parser::{AttemptedFields, MetadataResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/parse`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParseRequest {
    pub url: Option<String>,
}

/// Successful parse response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    pub message: String,
    pub tags: MetadataResult,
    pub tried_to_parse: AttemptedFields,
}

impl ParseResponse {
    pub fn success(tags: MetadataResult, tried_to_parse: AttemptedFields) -> Self {
        Self {
            message: "Success".to_string(),
            tags,
            tried_to_parse,
        }
    }
}

/// Uniform error body returned for every failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
    pub error: bool,
}
