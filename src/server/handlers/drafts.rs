//! Draft editing API handlers.
//!
//! Each draft lives in an [`EditorSession`] keyed by a UUID. Template lookups
//! use the cached catalog; store calls run with the session lock released.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::draft::{CardDraft, DraftEdit, EditMode, FontSizes, Side};
use crate::error::CardError;
use crate::export::{ExportFormat, ExportRequest};
use crate::persist::{PersistedCard, to_persisted_card};
use crate::preview::CardPreview;
use crate::session::{EditorSession, ViewState};
use crate::store::save_card;
use crate::template::{Design, TemplateCatalog, TemplateLookup};

use super::super::state::AppState;
use super::{ApiError, api_error, error_body, session_not_found};

/// Request body for creating a draft.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateDraftRequest {
    /// Start from this template. Without it or `card_id`, the catalog's
    /// first template is used.
    pub template_id: Option<String>,
    /// Load this saved card for editing. Wins over `template_id`.
    pub card_id: Option<String>,
}

/// A draft with its resolved designs.
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub id: String,
    pub draft: CardDraft,
    pub view: ViewState,
    pub front: Design,
    pub back: Design,
    pub font_sizes: FontSizes,
}

impl DraftResponse {
    fn new(id: &str, session: &EditorSession, catalog: &TemplateCatalog) -> Self {
        Self {
            id: id.to_string(),
            draft: session.draft.clone(),
            view: session.view(),
            front: session.draft.resolve_design(Side::Front, catalog),
            back: session.draft.resolve_design(Side::Back, catalog),
            font_sizes: session.draft.resolve_font_sizes(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewRequest {
    pub side: Option<Side>,
    pub mode: Option<EditMode>,
}

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    #[serde(default)]
    pub format: ExportFormat,
    /// Defaults to the side shown in the editor.
    pub side: Option<Side>,
}

/// POST /api/drafts - Open a new draft session.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<DraftResponse>), ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;

    let draft = match (&req.card_id, &req.template_id) {
        (Some(card_id), _) => {
            let card = state.cards.get_card(card_id).await.map_err(api_error)?;
            let template = card.template_id.as_deref().and_then(|id| catalog.template(id));
            CardDraft::initialize(template, Some(&card))
        }
        (None, Some(template_id)) => {
            let template = catalog
                .template(template_id)
                .ok_or_else(|| api_error(CardError::UnknownTemplate(template_id.clone())))?;
            CardDraft::initialize(Some(template), None)
        }
        (None, None) => CardDraft::initialize(catalog.first(), None),
    };

    let id = Uuid::new_v4().to_string();
    let session = EditorSession::new(draft);
    let response = DraftResponse::new(&id, &session, &catalog);
    state.sessions.write().await.insert(id.clone(), session);
    log::info!(
        "Opened draft {} (template: {}, card: {})",
        id,
        req.template_id.as_deref().unwrap_or("-"),
        req.card_id.as_deref().unwrap_or("-")
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/drafts/:id - Get a draft and its resolved designs.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DraftResponse>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    Ok(Json(DraftResponse::new(&id, session, &catalog)))
}

/// DELETE /api/drafts/:id - Close a draft session without saving.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(session_not_found)?;
    log::info!("Closed draft {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/drafts/:id/edit - Apply one edit.
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(edit): Json<DraftEdit>,
) -> Result<Json<DraftResponse>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();

    // A rejected edit leaves the draft as it was.
    session.draft = edit
        .apply(session.draft.clone(), catalog.as_ref())
        .map_err(api_error)?;
    Ok(Json(DraftResponse::new(&id, session, &catalog)))
}

/// PUT /api/drafts/:id/view - Switch the shown side or edit mode.
pub async fn view(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ViewState>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    if let Some(side) = req.side {
        session.side = side;
    }
    if let Some(mode) = req.mode {
        session.mode = mode;
    }
    Ok(Json(session.view()))
}

/// GET /api/drafts/:id/preview/:side - Preview one face.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path((id, side)): Path<(String, String)>,
) -> Result<Json<CardPreview>, ApiError> {
    let side: Side = side
        .parse()
        .map_err(|e: String| error_body(StatusCode::BAD_REQUEST, e))?;
    let catalog = state.catalog().await.map_err(api_error)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    Ok(Json(CardPreview::for_side(&session.draft, side, catalog.as_ref())))
}

/// POST /api/drafts/:id/save - Persist the draft.
///
/// Inserts on first save and updates afterwards. A second save while one is
/// running is rejected with 409.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PersistedCard>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;

    let snapshot = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
        session.touch();
        session.begin_save().map_err(api_error)?
    };

    let result = match to_persisted_card(&snapshot, snapshot.selected_template(catalog.as_ref())) {
        Ok(card) => save_card(state.cards.as_ref(), card).await,
        Err(e) => Err(e),
    };

    // The session may have been closed while the store call ran.
    if let Some(session) = state.sessions.write().await.get_mut(&id) {
        let saved_id = result.as_ref().ok().and_then(|card| card.id.as_deref());
        session.finish_save(saved_id);
    }

    match result {
        Ok(card) => {
            log::info!(
                "Saved draft {} as card {}",
                id,
                card.id.as_deref().unwrap_or("?")
            );
            Ok(Json(card))
        }
        Err(e) => {
            log::warn!("Save failed for draft {}: {}", id, e);
            Err(api_error(e))
        }
    }
}

/// POST /api/drafts/:id/export - Describe an image or PDF export.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<ExportBody>,
) -> Result<Json<ExportRequest>, ApiError> {
    let catalog = state.catalog().await.map_err(api_error)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    let side = body.side.unwrap_or(session.side);
    Ok(Json(ExportRequest::new(
        &session.draft,
        side,
        body.format,
        catalog.as_ref(),
    )))
}
