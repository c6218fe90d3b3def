//! Style and voice catalog endpoints.

use axum::Json;
use papercast_core::{PodcastStyle, VoicePreset};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StyleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StylesResponse {
    pub styles: Vec<StyleInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
    pub language: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

#[utoipa::path(
    get,
    path = "/api/styles",
    responses((status = 200, description = "Available podcast styles", body = StylesResponse)),
    tag = "catalog"
)]
pub async fn list_styles() -> Json<StylesResponse> {
    let styles = PodcastStyle::ALL
        .iter()
        .map(|style| StyleInfo {
            id: style.as_str().to_string(),
            name: style.display_name().to_string(),
            description: style.description().to_string(),
        })
        .collect();

    Json(StylesResponse { styles })
}

#[utoipa::path(
    get,
    path = "/api/voices",
    responses((status = 200, description = "Available voice presets", body = VoicesResponse)),
    tag = "catalog"
)]
pub async fn list_voices() -> Json<VoicesResponse> {
    let voices = VoicePreset::ALL
        .iter()
        .map(|preset| VoiceInfo {
            id: preset.as_str().to_string(),
            // The preset description doubles as the display name.
            name: preset.description().to_string(),
            language: preset.language_code().to_string(),
        })
        .collect();

    Json(VoicesResponse { voices })
}
