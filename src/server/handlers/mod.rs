//! HTTP handlers for the server.

pub mod cards;
pub mod drafts;
pub mod templates;

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

use crate::error::CardError;

/// Error half of every handler result: a status and `{"error": message}`.
pub type ApiError = (StatusCode, Json<Value>);

pub fn status_for(err: &CardError) -> StatusCode {
    match err {
        CardError::NoTemplateSelected
        | CardError::UnknownTemplate(_)
        | CardError::UnknownPreset(_)
        | CardError::InvalidField(_)
        | CardError::InvalidCustomization(_) => StatusCode::BAD_REQUEST,
        CardError::CardNotFound(_) => StatusCode::NOT_FOUND,
        CardError::SaveInProgress => StatusCode::CONFLICT,
        CardError::Backend(_) => StatusCode::BAD_GATEWAY,
        CardError::Io(_) | CardError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn api_error(err: CardError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        log::error!("{}", err);
    }
    error_body(status, err.to_string())
}

pub fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub fn session_not_found() -> ApiError {
    error_body(StatusCode::NOT_FOUND, "Session not found or expired")
}
