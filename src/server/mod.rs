//! # HTTP Server for the Card Editor
//!
//! JSON API over editor sessions, the template catalog, color presets and
//! saved cards.
//!
//! ## Usage
//!
//! ```bash
//! cardsmith serve --listen 127.0.0.1:8080 --data cards.json
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/templates?category=&q=` | Template list with category tabs |
//! | GET | `/api/templates/:id` | One template |
//! | GET | `/api/presets` | Built-in color presets |
//! | POST | `/api/drafts` | Open a draft (`{templateId?, cardId?}`) |
//! | GET, DELETE | `/api/drafts/:id` | Read or close a draft |
//! | POST | `/api/drafts/:id/edit` | Apply one edit |
//! | PUT | `/api/drafts/:id/view` | Switch side or edit mode |
//! | GET | `/api/drafts/:id/preview/:side` | Preview one face |
//! | POST | `/api/drafts/:id/save` | Insert or update the saved card |
//! | POST | `/api/drafts/:id/export` | Export description for image or PDF |
//! | GET | `/api/cards` | Saved cards |
//! | GET, DELETE | `/api/cards/:id` | Read or delete a saved card |

mod handlers;
mod state;

pub use handlers::status_for;
pub use state::{AppState, BackendConfig, ServerConfig};

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;

use crate::error::CardError;
use crate::session::SESSION_EXPIRATION_SECS;

/// Build the API router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Catalog
        .route("/api/templates", get(handlers::templates::list))
        .route("/api/templates/:id", get(handlers::templates::get))
        .route("/api/presets", get(handlers::templates::presets))
        // Drafts
        .route("/api/drafts", post(handlers::drafts::create))
        .route(
            "/api/drafts/:id",
            get(handlers::drafts::get).delete(handlers::drafts::delete),
        )
        .route("/api/drafts/:id/edit", post(handlers::drafts::edit))
        .route("/api/drafts/:id/view", put(handlers::drafts::view))
        .route(
            "/api/drafts/:id/preview/:side",
            get(handlers::drafts::preview),
        )
        .route("/api/drafts/:id/save", post(handlers::drafts::save))
        .route("/api/drafts/:id/export", post(handlers::drafts::export))
        // Saved cards
        .route("/api/cards", get(handlers::cards::list))
        .route(
            "/api/cards/:id",
            get(handlers::cards::get).delete(handlers::cards::delete),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use cardsmith::server::{serve, BackendConfig, ServerConfig};
///
/// # async fn example() -> Result<(), cardsmith::error::CardError> {
/// let config = ServerConfig {
///     listen_addr: "127.0.0.1:8080".to_string(),
///     backend: BackendConfig::Local { data_path: None },
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), CardError> {
    let app_state = Arc::new(AppState::from_config(&config.backend).await?);

    // Spawn background session cleanup task
    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = router(app_state);

    log::info!("cardsmith HTTP server starting...");
    log::info!("Listening on: {}", config.listen_addr);
    log::info!("Backend: {}", config.backend.describe());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            CardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", config.listen_addr, e),
            ))
        })?;

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task to drop idle editor sessions.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let removed = state.expire_sessions(Instant::now(), expiration).await;
        if removed > 0 {
            log::info!(
                "Cleaned up {} expired draft sessions ({} remaining)",
                removed,
                state.sessions.read().await.len()
            );
        }
    }
}
