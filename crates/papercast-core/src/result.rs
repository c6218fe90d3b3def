//! Normalized conversion result, shared by the gateway and the client.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a successful `POST /api/convert`, whichever mode produced it.
/// `audio_url` is always fully qualified and playable as-is; relative
/// backend locators are joined before this struct is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub audio_url: String,
    /// Transcript text with whitespace and line breaks preserved.
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl GenerationResult {
    pub fn has_transcript(&self) -> bool {
        self.transcript.as_deref().is_some_and(|t| !t.is_empty())
    }
}
