//! Upload acceptance policy.
//!
//! Ordered checks for a PDF upload candidate: media type first, then size.
//! The client session and the gateway run the same policy with their own
//! ceilings, so a file rejected locally is rejected the same way on the wire.

use bytes::Bytes;

use crate::error::AppError;

pub const BYTES_PER_MB: u64 = 1024 * 1024;
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_EXTENSION: &str = ".pdf";

/// A file picked for conversion, with its declared media type.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn size_mb(&self) -> f64 {
        self.size() as f64 / BYTES_PER_MB as f64
    }
}

/// Size ceiling for one acceptance layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_size_bytes: u64,
}

impl UploadPolicy {
    /// Client-session default ceiling. The gateway configures its own.
    pub const DEFAULT_MAX_SIZE_BYTES: u64 = 25 * BYTES_PER_MB;

    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    pub fn from_mb(max_size_mb: u64) -> Self {
        Self::new(max_size_mb * BYTES_PER_MB)
    }

    pub fn max_size_mb(&self) -> u64 {
        self.max_size_bytes / BYTES_PER_MB
    }

    /// Ordered checks; the first failure wins. A candidate that fails both
    /// checks reports `UnsupportedType`, never `TooLarge`.
    pub fn check(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        size: u64,
    ) -> Result<(), AppError> {
        if !is_pdf(file_name, content_type) {
            let declared = content_type
                .map(str::to_string)
                .unwrap_or_else(|| file_name.to_string());
            return Err(AppError::UnsupportedType(declared));
        }
        if size > self.max_size_bytes {
            return Err(AppError::TooLarge {
                size,
                limit: self.max_size_bytes,
            });
        }
        Ok(())
    }

    pub fn accept(&self, candidate: &UploadCandidate) -> Result<(), AppError> {
        self.check(
            &candidate.file_name,
            candidate.content_type.as_deref(),
            candidate.size(),
        )
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE_BYTES)
    }
}

/// A candidate counts as a PDF when its declared media type is
/// `application/pdf` (parameters stripped, case-insensitive) or its display
/// name ends in `.pdf`. Either signal alone is enough; browsers and CLI
/// clients disagree on which one they send.
pub fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    if let Some(declared) = content_type {
        let essence = declared.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
            return true;
        }
    }
    file_name.to_ascii_lowercase().ends_with(PDF_EXTENSION)
}
