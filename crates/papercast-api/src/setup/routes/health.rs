//! Gateway health endpoints.
//!
//! `/live` answers as soon as the process accepts connections. `/health`
//! additionally probes the processing backend when running in proxy mode;
//! in mock mode there is nothing downstream to check.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use papercast_core::ConvertMode;
use serde::Serialize;

use crate::state::AppState;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    convert_mode: String,
    backend: String,
}

/// Run a health check with a timeout, mapping the outcome to a status string.
async fn run_check<F, E>(timeout: Duration, check: F, error_prefix: &str) -> String
where
    F: std::future::Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, check).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let backend = match state.convert.mode {
        ConvertMode::Mock => "not_checked".to_string(),
        ConvertMode::Proxy => {
            let client = state.convert.backend.clone();
            run_check(
                HEALTH_CHECK_TIMEOUT,
                async move { client.health().await.map(|_| ()) },
                "unhealthy",
            )
            .await
        }
    };

    let healthy = backend == "healthy" || backend == "not_checked";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        convert_mode: state.convert.mode.as_str().to_string(),
        backend,
    };

    (status, Json(response))
}

/// Liveness probe: returns 200 as soon as the server can route requests.
pub async fn liveness_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "alive" }))
}
