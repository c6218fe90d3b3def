//! Route configuration and setup.

mod health;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use papercast_core::upload::BYTES_PER_MB;
use papercast_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

use crate::api_doc::get_openapi_spec;
use crate::handlers::{catalog, convert};
use crate::state::AppState;

/// Slack on top of the configured upload ceiling so oversized files reach
/// the handler and get a 413 that names the limit, instead of a bare
/// connection abort. Only absurdly large bodies hit the transport layer cap.
const BODY_LIMIT_SLACK_BYTES: u64 = BYTES_PER_MB;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(config)?;
    let body_limit = (config.max_upload_size_bytes + BODY_LIMIT_SLACK_BYTES) as usize;

    let app = Router::new()
        .route(
            "/api/convert",
            post(convert::convert).get(convert::convert_status),
        )
        .route("/api/styles", get(catalog::list_styles))
        .route("/api/voices", get(catalog::list_voices))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(get_openapi_spec()) }),
        )
        .nest("/docs", RapiDoc::new("/api/openapi.json").path("/docs").into())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.len() == 1 && config.cors_origins[0] == "*" {
        tracing::warn!(
            "CORS is configured to allow any origin. This should only be used in development."
        );
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    Ok(cors)
}
