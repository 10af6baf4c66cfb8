//! Template and preset API handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use crate::draft::ColorPreset;
use crate::template::{Template, TemplateFilter, TemplateLookup};

use super::super::state::AppState;
use super::{ApiError, api_error, error_body};

#[derive(Debug, Serialize)]
pub struct TemplateList {
    /// Category tabs, "All" first.
    pub categories: Vec<String>,
    pub templates: Vec<Template>,
}

/// GET /api/templates - List templates, optionally filtered.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TemplateFilter>,
) -> Result<Json<TemplateList>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;
    Ok(Json(TemplateList {
        categories: catalog.categories(),
        templates: catalog.filter(&filter).into_iter().cloned().collect(),
    }))
}

/// GET /api/templates/:id - Get one template.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;
    catalog
        .template(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, format!("Template '{}' not found", id)))
}

/// GET /api/presets - List built-in color presets.
pub async fn presets() -> Json<Vec<ColorPreset>> {
    Json(ColorPreset::built_in())
}
