//! # Error Types
//!
//! This module defines error types used throughout the cardsmith library.
//!
//! Malformed stored cards are deliberately absent from this list: payloads
//! are coerced at the boundary and resolution falls back to literal colors.

use thiserror::Error;

/// Main error type for cardsmith operations
#[derive(Debug, Error)]
pub enum CardError {
    /// Flatten/save attempted without a resolved template
    #[error("No template selected")]
    NoTemplateSelected,

    /// A template id that does not exist in the catalog
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// A color preset name that does not exist
    #[error("Unknown color preset '{0}'")]
    UnknownPreset(String),

    /// Unknown contact field name
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Unknown customization key or a value of the wrong kind
    #[error("Invalid customization: {0}")]
    InvalidCustomization(String),

    /// Stored card lookup failed
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// A save for the same draft is still running
    #[error("Save already in progress")]
    SaveInProgress,

    /// Backend collaborator failure (network, auth, storage)
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CardError {
    fn from(e: reqwest::Error) -> Self {
        CardError::Backend(e.to_string())
    }
}
