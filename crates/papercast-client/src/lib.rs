//! HTTP client and conversion session for the Papercast gateway.
//!
//! [`ApiClient`] talks to the gateway over HTTP. [`session::ConvertSession`]
//! is the page-level orchestrator: it owns upload acceptance, the generation
//! options, the generation protocol, and the player view model, and submits
//! through the [`session::ConvertTransport`] trait. `ApiClient` is the
//! production transport; the CLI drives a session with it.

pub mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use papercast_core::{GenerationOptions, GenerationResult, UploadCandidate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::session::{ConvertTransport, SubmitError};

/// Error body shape the gateway produces; only the message matters here.
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: Option<String>,
}

/// HTTP client for the Papercast gateway.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        // Generation can legitimately take minutes, so the timeout is wide.
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the environment: `PAPERCAST_API_URL` (or
    /// `API_URL`), falling back to the local gateway.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PAPERCAST_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes the JSON response.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Submit a conversion request.
    ///
    /// Transport failures become [`SubmitError::Network`]; gateway error
    /// responses become [`SubmitError::Backend`] carrying the body's `error`
    /// message when present.
    pub async fn convert(
        &self,
        file: &UploadCandidate,
        options: &GenerationOptions,
    ) -> Result<GenerationResult, SubmitError> {
        let url = self.build_url("/api/convert");

        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone());
        let part = match file.content_type.as_deref() {
            Some(content_type) => part
                .mime_str(content_type)
                .map_err(|e| SubmitError::Network(format!("Invalid content type: {}", e)))?,
            None => part,
        };

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("style", options.style.as_str())
            .text("speed", options.speed.wire_value());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = parse_gateway_error(&error_text)
                .unwrap_or_else(|| format!("Conversion failed with status {}", status));
            return Err(SubmitError::Backend(message));
        }

        response
            .json()
            .await
            .map_err(|e| SubmitError::Backend(format!("Malformed gateway response: {}", e)))
    }

    /// Backend-liveness relay: `GET /api/convert`. Answers 200 or 503, both
    /// with a JSON document describing the conversion path.
    pub async fn convert_status(&self) -> Result<serde_json::Value> {
        let url = self.build_url("/api/convert");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;

        response
            .json()
            .await
            .context("Failed to parse response as JSON")
    }

    /// Podcast style catalog: `GET /api/styles`.
    pub async fn styles(&self) -> Result<serde_json::Value> {
        self.get("/api/styles").await
    }

    /// Voice preset catalog: `GET /api/voices`.
    pub async fn voices(&self) -> Result<serde_json::Value> {
        self.get("/api/voices").await
    }
}

#[async_trait]
impl ConvertTransport for ApiClient {
    async fn convert(
        &self,
        file: &UploadCandidate,
        options: &GenerationOptions,
    ) -> Result<GenerationResult, SubmitError> {
        ApiClient::convert(self, file, options).await
    }
}

fn parse_gateway_error(body: &str) -> Option<String> {
    let parsed: GatewayErrorBody = serde_json::from_str(body).ok()?;
    parsed.error
}

// Re-export session types for convenience.
pub use session::{
    ConvertSession, Notice, NoticeKind, PlayerView, SessionPhase, TranscriptView,
};
