//! Application setup and initialization.

pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use papercast_core::{Config, UploadPolicy};

use crate::backend::BackendClient;
use crate::state::{AppState, ConvertState};
use crate::telemetry;

/// Initialize telemetry, build application state, and wire up routes.
/// Returns the shared state and the ready-to-serve router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = build_state(&config)?;
    let app = routes::setup_routes(&config, state.clone())?;

    Ok((state, app))
}

/// Build the shared application state from configuration. Split out from
/// [`initialize_app`] so tests can construct state without touching the
/// global telemetry subscriber.
pub fn build_state(config: &Config) -> Result<Arc<AppState>> {
    let backend = BackendClient::new(
        &config.backend_url,
        Duration::from_secs(config.backend_timeout_secs),
    )
    .context("Failed to create backend client")?;

    Ok(Arc::new(AppState {
        convert: ConvertState {
            mode: config.convert_mode,
            backend,
            voice_preset: config.default_voice,
            duration_minutes: config.default_duration_minutes,
            mock_audio_url: config.mock_audio_url.clone(),
        },
        upload_policy: UploadPolicy::new(config.max_upload_size_bytes),
        is_production: config.is_production(),
        config: config.clone(),
    }))
}
