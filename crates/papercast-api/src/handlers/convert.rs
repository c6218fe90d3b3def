//! Conversion endpoint.
//!
//! `POST /api/convert` accepts a multipart form with a `file` part plus
//! optional `style` and `speed` text fields, re-validates the upload, and
//! either returns a canned result (mock mode) or forwards the document to
//! the processing backend (proxy mode). `GET /api/convert` reports whether
//! the conversion path is usable right now.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use papercast_core::{
    AppError, ConvertMode, ErrorMetadata, GenerationOptions, GenerationResult, PodcastStyle,
    Speed, UploadCandidate,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::mock;
use crate::state::AppState;

/// A parsed conversion submission, not yet validated against the policy.
struct ConvertSubmission {
    file: UploadCandidate,
    options: GenerationOptions,
}

/// Pull the file and option fields out of the multipart form.
///
/// Exactly one `file` part is accepted. `style` and `speed` are optional;
/// blank values count as absent. Unknown fields are ignored so older
/// frontends can keep sending extras.
async fn extract_submission(mut multipart: Multipart) -> Result<ConvertSubmission, AppError> {
    let mut file: Option<UploadCandidate> = None;
    let mut style: Option<PodcastStyle> = None;
    let mut speed: Option<Speed> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file = Some(UploadCandidate::new(file_name, content_type, data));
            }
            "style" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read style field: {}", e))
                })?;
                if !text.trim().is_empty() {
                    style = Some(text.parse()?);
                }
            }
            "speed" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read speed field: {}", e))
                })?;
                if !text.trim().is_empty() {
                    speed = Some(text.parse()?);
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or(AppError::MissingFile)?;

    Ok(ConvertSubmission {
        file,
        options: GenerationOptions {
            style: style.unwrap_or_default(),
            speed: speed.unwrap_or_default(),
        },
    })
}

#[utoipa::path(
    post,
    path = "/api/convert",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Conversion succeeded", body = GenerationResult),
        (status = 400, description = "Missing file, unsupported type, or invalid options", body = ErrorResponse),
        (status = 413, description = "File exceeds the upload limit", body = ErrorResponse),
        (status = 502, description = "Processing backend reported a failure", body = ErrorResponse),
        (status = 503, description = "Processing backend unreachable", body = ErrorResponse)
    ),
    tag = "convert"
)]
pub async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<GenerationResult>, HttpAppError> {
    let request_id = uuid::Uuid::new_v4();

    let submission = extract_submission(multipart).await?;
    state.upload_policy.accept(&submission.file)?;

    tracing::info!(
        request_id = %request_id,
        file_name = %submission.file.file_name,
        file_size = submission.file.size(),
        style = submission.options.style.as_str(),
        speed = %submission.options.speed,
        mode = state.convert.mode.as_str(),
        "Accepted conversion request"
    );

    let result = match state.convert.mode {
        ConvertMode::Mock => {
            mock::mock_result(&state.convert, &submission.file, &submission.options)
        }
        ConvertMode::Proxy => {
            state
                .convert
                .backend
                .process(
                    &submission.file,
                    &submission.options,
                    state.convert.voice_preset,
                    state.convert.duration_minutes,
                )
                .await?
        }
    };

    tracing::debug!(
        request_id = %request_id,
        audio_url = %result.audio_url,
        has_transcript = result.has_transcript(),
        "Conversion complete"
    );

    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/convert",
    responses(
        (status = 200, description = "Conversion path is usable", body = serde_json::Value),
        (status = 503, description = "Processing backend unreachable", body = serde_json::Value)
    ),
    tag = "convert"
)]
pub async fn convert_status(State(state): State<Arc<AppState>>) -> Response {
    match state.convert.mode {
        ConvertMode::Mock => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "mode": "mock" })),
        )
            .into_response(),
        ConvertMode::Proxy => match state.convert.backend.health().await {
            Ok(backend) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "status": "ok",
                    "mode": "proxy",
                    "backend": backend,
                })),
            )
                .into_response(),
            Err(e) => {
                tracing::warn!(
                    backend_url = %state.convert.backend.base_url(),
                    error = %e,
                    "Backend liveness check failed"
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({
                        "status": "unavailable",
                        "mode": "proxy",
                        "detail": e.client_message(),
                    })),
                )
                    .into_response()
            }
        },
    }
}
