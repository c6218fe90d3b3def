//! Generation options: podcast style, voice preset, and speaking speed.
//!
//! `PodcastStyle` is the single authoritative style catalog shared by the
//! control surface, the gateway catalog endpoint, and the API docs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Narration style for the generated podcast.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodcastStyle {
    #[default]
    Conversational,
    Academic,
    /// `simplified` is accepted as a legacy spelling of this style.
    #[serde(alias = "simplified")]
    Simple,
    Storytelling,
}

impl PodcastStyle {
    pub const ALL: [PodcastStyle; 4] = [
        PodcastStyle::Conversational,
        PodcastStyle::Academic,
        PodcastStyle::Simple,
        PodcastStyle::Storytelling,
    ];

    /// Wire identifier, as sent in multipart fields and catalog responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            PodcastStyle::Conversational => "conversational",
            PodcastStyle::Academic => "academic",
            PodcastStyle::Simple => "simple",
            PodcastStyle::Storytelling => "storytelling",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PodcastStyle::Conversational => "Conversational",
            PodcastStyle::Academic => "Academic",
            PodcastStyle::Simple => "Simple",
            PodcastStyle::Storytelling => "Storytelling",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PodcastStyle::Conversational => "Friendly and engaging",
            PodcastStyle::Academic => "Formal and detailed",
            PodcastStyle::Simple => "Clear and beginner-friendly",
            PodcastStyle::Storytelling => "Narrative-driven",
        }
    }
}

impl fmt::Display for PodcastStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodcastStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conversational" => Ok(PodcastStyle::Conversational),
            "academic" => Ok(PodcastStyle::Academic),
            "simple" | "simplified" => Ok(PodcastStyle::Simple),
            "storytelling" => Ok(PodcastStyle::Storytelling),
            other => Err(AppError::InvalidInput(format!(
                "Unknown podcast style '{}'. Valid styles: conversational, academic, simple, storytelling",
                other
            ))),
        }
    }
}

/// Voice preset catalog mirrored from the synthesis backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoicePreset {
    #[default]
    FemaleWarm,
    FemaleProfessional,
    MaleWarm,
    MaleProfessional,
    BritishFemale,
}

impl VoicePreset {
    pub const ALL: [VoicePreset; 5] = [
        VoicePreset::FemaleWarm,
        VoicePreset::FemaleProfessional,
        VoicePreset::MaleWarm,
        VoicePreset::MaleProfessional,
        VoicePreset::BritishFemale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoicePreset::FemaleWarm => "female_warm",
            VoicePreset::FemaleProfessional => "female_professional",
            VoicePreset::MaleWarm => "male_warm",
            VoicePreset::MaleProfessional => "male_professional",
            VoicePreset::BritishFemale => "british_female",
        }
    }

    pub fn language_code(&self) -> &'static str {
        match self {
            VoicePreset::BritishFemale => "en-GB",
            _ => "en-US",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            VoicePreset::FemaleWarm => "Warm female voice",
            VoicePreset::FemaleProfessional => "Professional female voice",
            VoicePreset::MaleWarm => "Warm male voice",
            VoicePreset::MaleProfessional => "Professional male voice",
            VoicePreset::BritishFemale => "British female voice",
        }
    }
}

impl fmt::Display for VoicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoicePreset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female_warm" => Ok(VoicePreset::FemaleWarm),
            "female_professional" => Ok(VoicePreset::FemaleProfessional),
            "male_warm" => Ok(VoicePreset::MaleWarm),
            "male_professional" => Ok(VoicePreset::MaleProfessional),
            "british_female" => Ok(VoicePreset::BritishFemale),
            other => Err(AppError::InvalidInput(format!(
                "Unknown voice preset '{}'",
                other
            ))),
        }
    }
}

/// Playback/narration speed. Always within 0.8-1.3 inclusive on a 0.05 grid;
/// the constructor clamps and snaps, so a raw value never leaves this module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Speed(f32);

impl Speed {
    pub const MIN: f32 = 0.8;
    pub const MAX: f32 = 1.3;
    pub const STEP: f32 = 0.05;

    pub fn new(value: f32) -> Self {
        if !value.is_finite() {
            return Speed::default();
        }
        let clamped = value.clamp(Self::MIN, Self::MAX);
        // Snap to the 0.05 grid; multiplying by 20 keeps the rounding exact in f32.
        Speed((clamped * 20.0).round() / 20.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Label shown next to the speed control, e.g. "1.05x".
    pub fn label(self) -> String {
        format!("{:.2}x", self.0)
    }

    /// Wire form for multipart fields, e.g. "1" or "0.8".
    pub fn wire_value(self) -> String {
        self.0.to_string()
    }
}

impl Default for Speed {
    fn default() -> Self {
        Speed(1.0)
    }
}

impl From<f32> for Speed {
    fn from(value: f32) -> Self {
        Speed::new(value)
    }
}

impl From<Speed> for f32 {
    fn from(speed: Speed) -> f32 {
        speed.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

impl FromStr for Speed {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: f32 = s
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Invalid speed value: {}", s)))?;
        Ok(Speed::new(raw))
    }
}

/// User-adjustable options carried by a conversion session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub style: PodcastStyle,
    pub speed: Speed,
}
