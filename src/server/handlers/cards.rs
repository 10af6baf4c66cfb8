//! Saved card API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use crate::persist::PersistedCard;

use super::super::state::AppState;
use super::{ApiError, api_error};

/// GET /api/cards - List saved cards.
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PersistedCard>>, ApiError> {
    state.cards.list_cards().await.map(Json).map_err(api_error)
}

/// GET /api/cards/:id - Get one saved card.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PersistedCard>, ApiError> {
    state.cards.get_card(&id).await.map(Json).map_err(api_error)
}

/// DELETE /api/cards/:id - Delete a saved card.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.cards.delete_card(&id).await.map_err(api_error)?;
    log::info!("Deleted card {}", id);
    Ok(StatusCode::NO_CONTENT)
}
