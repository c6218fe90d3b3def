//! Client for the podcast processing backend.
//!
//! The backend owns the heavy lifting (text extraction, script writing,
//! speech synthesis); this client forwards accepted uploads to
//! `POST {base}/api/process`, normalizes the response into a
//! [`GenerationResult`], and probes `GET {base}/` for liveness.

use std::time::Duration;

use anyhow::{Context, Result};
use papercast_core::upload::PDF_CONTENT_TYPE;
use papercast_core::{AppError, GenerationOptions, GenerationResult, UploadCandidate, VoicePreset};
use reqwest::Client;
use serde::Deserialize;

/// Timeout for the liveness probe. Generation calls use the client-wide
/// timeout instead, since synthesis can legitimately take minutes.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Response body of `POST {base}/api/process`.
#[derive(Debug, Deserialize)]
pub struct BackendProcessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body shapes the backend emits on non-2xx statuses. FastAPI-style
/// services use `detail`, others use `error`; accept both.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for the processing backend")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a backend-relative audio locator with the backend base address.
    /// Absolute locators pass through untouched.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Forward an accepted upload to the backend and normalize the result.
    ///
    /// Transport failures map to `BackendUnavailable` (503), everything the
    /// backend itself reports as failed maps to `Backend` (502) with the
    /// backend's own message relayed verbatim.
    pub async fn process(
        &self,
        file: &UploadCandidate,
        options: &GenerationOptions,
        voice_preset: VoicePreset,
        duration_minutes: u32,
    ) -> Result<GenerationResult, AppError> {
        let url = format!("{}/api/process", self.base_url);

        let part = reqwest::multipart::Part::bytes(file.data.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(file.content_type.as_deref().unwrap_or(PDF_CONTENT_TYPE))
            .map_err(|e| AppError::InvalidInput(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("style", options.style.as_str())
            .text("voice_preset", voice_preset.as_str())
            .text("duration_minutes", duration_minutes.to_string())
            .text("speaking_rate", options.speed.wire_value());

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = parse_error_message(&error_text)
                .unwrap_or_else(|| format!("Processing backend returned {}", status));
            return Err(AppError::Backend(message));
        }

        let body: BackendProcessResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Malformed backend response: {}", e)))?;

        self.normalize(body)
    }

    /// Turn a raw process response into a [`GenerationResult`], treating
    /// `success: false` and a missing audio locator as backend failures.
    fn normalize(&self, body: BackendProcessResponse) -> Result<GenerationResult, AppError> {
        if !body.success {
            let message = body
                .error
                .unwrap_or_else(|| "Podcast generation failed".to_string());
            return Err(AppError::Backend(message));
        }

        let Some(audio_url) = body.audio_url else {
            // The backend reports success without audio when synthesis is
            // disabled upstream; its error field explains which service.
            let message = body
                .error
                .unwrap_or_else(|| "Processing backend produced no audio".to_string());
            return Err(AppError::Backend(message));
        };

        Ok(GenerationResult {
            audio_url: self.absolute_url(&audio_url),
            transcript: body.transcript,
            metadata: body.metadata,
        })
    }

    /// Probe the backend root endpoint and return its status document.
    pub async fn health(&self) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::BackendUnavailable(format!(
                "Backend health endpoint returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::BackendUnavailable(format!("Malformed health response: {}", e)))
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    let parsed: BackendErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.or(parsed.detail)
}
