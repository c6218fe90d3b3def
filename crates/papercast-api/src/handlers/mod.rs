//! Request handlers.

pub mod catalog;
pub mod convert;
