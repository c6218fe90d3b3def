//! Canned conversion results for mock mode.
//!
//! Mock mode lets the gateway run as a self-contained demo with no
//! processing backend: every conversion returns a fixed audio sample and a
//! generated transcript that names the uploaded document.

use chrono::Utc;
use papercast_core::{GenerationOptions, GenerationResult, UploadCandidate};
use serde_json::json;

use crate::state::ConvertState;

pub fn mock_result(
    convert: &ConvertState,
    file: &UploadCandidate,
    options: &GenerationOptions,
) -> GenerationResult {
    let transcript = format!(
        "HOST A: Welcome in. Today we're working through {name}.\n\
         HOST B: It's a {style} take, played back at {speed}.\n\
         HOST A: This transcript was produced in mock mode, so the audio is a\n\
         stand-in sample rather than a reading of the document.\n\
         HOST B: Point the gateway at a processing backend to hear the real thing.",
        name = file.file_name,
        style = options.style.display_name(),
        speed = options.speed.label(),
    );

    GenerationResult {
        audio_url: convert.mock_audio_url.clone(),
        transcript: Some(transcript),
        metadata: Some(json!({
            "source": "mock",
            "filename": file.file_name,
            "style": options.style.as_str(),
            "speaking_rate": options.speed.value(),
            "voice": convert.voice_preset.description(),
            "language": convert.voice_preset.language_code(),
            "generated_at": Utc::now().to_rfc3339(),
        })),
    }
}
