//! Application state management.
//!
//! [`AppState`] aggregates the conversion runtime and the upload policy;
//! axum's `FromRef` lets handlers extract just the sub-state they need.

use std::sync::Arc;

use papercast_core::{Config, ConvertMode, UploadPolicy, VoicePreset};

use crate::backend::BackendClient;

/// Conversion runtime: the active mode, the backend client, and the
/// fixed values forwarded with every generation request.
#[derive(Clone)]
pub struct ConvertState {
    pub mode: ConvertMode,
    pub backend: BackendClient,
    pub voice_preset: VoicePreset,
    pub duration_minutes: u32,
    pub mock_audio_url: String,
}

/// Main application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub convert: ConvertState,
    pub upload_policy: UploadPolicy,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for ConvertState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.convert.clone()
    }
}

// Compile-time check that AppState can be shared across axum tasks.
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
