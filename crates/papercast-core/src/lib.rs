//! Papercast Core Library
//!
//! This crate provides the domain model shared across all papercast
//! components: generation options, the upload acceptance policy, the
//! normalized conversion result, error types, and configuration.

pub mod config;
pub mod error;
pub mod options;
pub mod result;
pub mod upload;

// Re-export commonly used types
pub use config::{Config, ConvertMode};
pub use error::{AppError, ErrorMetadata, ErrorStage, LogLevel};
pub use options::{GenerationOptions, PodcastStyle, Speed, VoicePreset};
pub use result::GenerationResult;
pub use upload::{UploadCandidate, UploadPolicy};
