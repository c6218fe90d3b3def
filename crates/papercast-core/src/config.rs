//! Configuration module
//!
//! Environment-driven configuration for the papercast gateway: server
//! settings, the conversion mode, backend coordinates, and the upload
//! ceiling.

use std::env;
use std::str::FromStr;

use crate::error::AppError;
use crate::options::VoicePreset;
use crate::upload::BYTES_PER_MB;

// Common constants
const SERVER_PORT: u16 = 3000;
const BACKEND_URL: &str = "http://localhost:8000";
const BACKEND_TIMEOUT_SECS: u64 = 300;
const MAX_UPLOAD_SIZE_MB: u64 = 20;
const DEFAULT_DURATION_MINUTES: u32 = 5;
const MOCK_AUDIO_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

/// How `POST /api/convert` produces its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertMode {
    /// Return a canned demonstration result without touching any backend.
    Mock,
    /// Forward the upload to the processing backend and relay its answer.
    Proxy,
}

impl ConvertMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConvertMode::Mock => "mock",
            ConvertMode::Proxy => "proxy",
        }
    }
}

impl FromStr for ConvertMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ConvertMode::Mock),
            "proxy" => Ok(ConvertMode::Proxy),
            other => Err(AppError::InvalidInput(format!(
                "Unknown convert mode '{}'. Valid modes: mock, proxy",
                other
            ))),
        }
    }
}

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub convert_mode: ConvertMode,
    pub backend_url: String,
    pub backend_timeout_secs: u64,
    pub max_upload_size_bytes: u64,
    pub default_voice: VoicePreset,
    pub default_duration_minutes: u32,
    pub mock_audio_url: String,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase().eq("production") || self.environment.to_lowercase().eq("prod")
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let convert_mode = env::var("CONVERT_MODE")
            .unwrap_or_else(|_| "mock".to_string())
            .parse::<ConvertMode>()?;

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = Config {
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            environment,
            cors_origins,
            convert_mode,
            backend_url: env::var("BACKEND_URL").unwrap_or_else(|_| BACKEND_URL.to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| BACKEND_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(BACKEND_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * BYTES_PER_MB,
            default_voice: env::var("DEFAULT_VOICE_PRESET")
                .unwrap_or_else(|_| "female_warm".to_string())
                .parse::<VoicePreset>()?,
            default_duration_minutes: env::var("DEFAULT_DURATION_MINUTES")
                .unwrap_or_else(|_| DEFAULT_DURATION_MINUTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_DURATION_MINUTES),
            mock_audio_url: env::var("MOCK_AUDIO_URL")
                .unwrap_or_else(|_| MOCK_AUDIO_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.convert_mode == ConvertMode::Proxy
            && !(self.backend_url.starts_with("http://") || self.backend_url.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "BACKEND_URL must be an http(s) URL when CONVERT_MODE=proxy"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}
