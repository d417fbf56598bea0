//! Request extractors that reject with the failure envelope.
//!
//! - [`Json`] replaces [`axum::Json`] and maps rejections to 400 responses.
//! - [`ValidateJson`] deserializes and then runs `validator` rules.
//! - [`Query`] replaces [`axum::extract::Query`] with field-aware messages.

pub mod reject;

pub use crate::extract::reject::{Json, Query, ValidateJson};
