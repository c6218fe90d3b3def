//! Papercast API Library
//!
//! HTTP gateway for PDF-to-podcast conversion: upload validation,
//! mock or proxied generation, catalogs, and health probes.

// Module declarations
mod api_doc;
mod handlers;
mod mock;
mod telemetry;

// Public modules
pub mod backend;
pub mod error;
pub mod setup;
pub mod state;

// Re-export commonly used types
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
