//! # Server Tests
//!
//! Drives the HTTP router in-process against a local store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use cardsmith::server::{AppState, router};
use cardsmith::store::LocalStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let store = Arc::new(LocalStore::in_memory());
    router(Arc::new(AppState::new(store.clone(), store)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_draft(app: &Router, body: Value) -> String {
    let (status, draft) = send(app, "POST", "/api/drafts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    draft["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_template_listing_and_filter() {
    let app = app();
    let (status, all) = send(&app, "GET", "/api/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["templates"].as_array().unwrap().len(), 8);
    assert_eq!(all["categories"][0], json!("All"));

    let (_, luxury) = send(&app, "GET", "/api/templates?category=Luxury", None).await;
    let ids: Vec<&str> = luxury["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"luxury-gold"));
    assert!(luxury["templates"]
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["category"] == json!("Luxury")));

    let (status, one) = send(&app, "GET", "/api/templates/corporate-blue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["front_design"]["background"], json!("#1e3a8a"));

    let (status, _) = send(&app, "GET", "/api/templates/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_presets() {
    let app = app();
    let (status, presets) = send(&app, "GET", "/api/presets", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(presets.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_draft_edit_and_resolve() {
    let app = app();
    let id = open_draft(&app, json!({"templateId": "corporate-blue"})).await;

    let (status, draft) = send(
        &app,
        "POST",
        &format!("/api/drafts/{}/edit", id),
        Some(json!({"op": "set_customization", "key": "frontBackground", "value": "#ff0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(draft["front"]["background"], json!("#ff0000"));
    assert_eq!(draft["front"]["textColor"], json!("#ffffff"));

    // Explicit background survives a template switch.
    let (_, draft) = send(
        &app,
        "POST",
        &format!("/api/drafts/{}/edit", id),
        Some(json!({"op": "select_template", "template_id": "luxury-gold"})),
    )
    .await;
    assert_eq!(draft["front"]["background"], json!("#ff0000"));
    assert_eq!(draft["front"]["textColor"], json!("#d4af37"));
}

#[tokio::test]
async fn test_bad_edits_are_rejected() {
    let app = app();
    let id = open_draft(&app, json!({})).await;
    let uri = format!("/api/drafts/{}/edit", id);

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"op": "update_field", "field": "fax", "value": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fax"));

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"op": "set_customization", "key": "nameFontSize", "value": "#fff"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({"op": "apply_preset", "preset": "Neon"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_template_and_session() {
    let app = app();
    let (status, _) = send(&app, "POST", "/api/drafts", Some(json!({"templateId": "gone"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/drafts/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_new_draft_defaults_to_first_template() {
    let app = app();
    let (status, draft) = send(&app, "POST", "/api/drafts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(draft["draft"]["templateId"], json!("modern-minimalist"));

    let (_, template) = send(&app, "GET", "/api/templates/modern-minimalist", None).await;
    assert_eq!(draft["front"], template["front_design"]);
    assert_eq!(draft["back"], template["back_design"]);
}

#[tokio::test]
async fn test_save_without_template_is_rejected() {
    let app = app();
    let id = open_draft(&app, json!({})).await;
    send(
        &app,
        "POST",
        &format!("/api/drafts/{}/edit", id),
        Some(json!({"op": "select_template", "templateId": "retired"})),
    )
    .await;
    let (status, body) = send(&app, "POST", &format!("/api/drafts/{}/save", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No template selected"}));

    // The busy flag was cleared.
    let (_, draft) = send(&app, "GET", &format!("/api/drafts/{}", id), None).await;
    assert_eq!(draft["view"]["saving"], json!(false));
}

#[tokio::test]
async fn test_save_then_reopen() {
    let app = app();
    let id = open_draft(&app, json!({"templateId": "tech-innovator"})).await;
    let edit = format!("/api/drafts/{}/edit", id);
    send(
        &app,
        "POST",
        &edit,
        Some(json!({"op": "update_field", "field": "email", "value": "ada@example.com"})),
    )
    .await;
    send(
        &app,
        "POST",
        &edit,
        Some(json!({"op": "set_customization", "key": "backTextColor", "value": "#010101"})),
    )
    .await;

    let (status, saved) = send(&app, "POST", &format!("/api/drafts/{}/save", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let card_id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(saved["back_data"]["customTextColor"], json!("#010101"));
    assert_eq!(saved["back_data"]["email"], json!("ada@example.com"));

    // Saving again updates the same card.
    let (_, again) = send(&app, "POST", &format!("/api/drafts/{}/save", id), None).await;
    assert_eq!(again["id"], json!(card_id));
    let (_, cards) = send(&app, "GET", "/api/cards", None).await;
    assert_eq!(cards.as_array().unwrap().len(), 1);

    // Reopening the card resolves the same designs.
    let (_, original) = send(&app, "GET", &format!("/api/drafts/{}", id), None).await;
    let reopened = open_draft(&app, json!({"cardId": card_id})).await;
    let (_, reopened) = send(&app, "GET", &format!("/api/drafts/{}", reopened), None).await;
    assert_eq!(reopened["front"], original["front"]);
    assert_eq!(reopened["back"], original["back"]);
    assert_eq!(reopened["draft"]["contactFields"]["email"], json!("ada@example.com"));

    let (status, _) = send(&app, "DELETE", &format!("/api/cards/{}", card_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/cards/{}", card_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_view_preview_and_export() {
    let app = app();
    let id = open_draft(&app, json!({"templateId": "modern-minimalist"})).await;
    send(
        &app,
        "POST",
        &format!("/api/drafts/{}/edit", id),
        Some(json!({"op": "rename", "name": "Sales Team"})),
    )
    .await;

    let (status, view) = send(
        &app,
        "PUT",
        &format!("/api/drafts/{}/view", id),
        Some(json!({"side": "back", "mode": "design"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view, json!({"side": "back", "mode": "design", "saving": false}));

    let (status, preview) = send(&app, "GET", &format!("/api/drafts/{}/preview/back", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["side"], json!("back"));
    assert_eq!(preview["lines"][0]["text"], json!("Contact"));

    let (status, _) = send(&app, "GET", &format!("/api/drafts/{}/preview/middle", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Export defaults to the side shown in the editor.
    let (status, export) = send(
        &app,
        "POST",
        &format!("/api/drafts/{}/export", id),
        Some(json!({"format": "document"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["filename"], json!("sales-team-business-card.pdf"));
    assert_eq!(export["surface"]["side"], json!("back"));

    let (status, export) = send(
        &app,
        "POST",
        &format!("/api/drafts/{}/export", id),
        Some(json!({"format": "png", "side": "front"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["format"], json!("image"));
    assert_eq!(export["filename"], json!("sales-team-business-card.png"));

    let (status, _) = send(&app, "DELETE", &format!("/api/drafts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/drafts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
