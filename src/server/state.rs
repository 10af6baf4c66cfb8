//! Server state and configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::error::CardError;
use crate::session::EditorSession;
use crate::store::{CardStore, HostedConfig, HostedStore, LocalStore, TemplateSource};
use crate::template::TemplateCatalog;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "127.0.0.1:8080")
    pub listen_addr: String,
    pub backend: BackendConfig,
}

/// Where templates and saved cards live.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Built-in templates; cards in memory, or in a JSON file when a path is given.
    Local { data_path: Option<PathBuf> },
    /// Hosted REST backend.
    Hosted(HostedConfig),
}

impl BackendConfig {
    pub fn describe(&self) -> String {
        match self {
            BackendConfig::Local { data_path: None } => "local (in memory)".to_string(),
            BackendConfig::Local {
                data_path: Some(path),
            } => format!("local ({})", path.display()),
            BackendConfig::Hosted(hosted) => format!("hosted ({})", hosted.base_url),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub templates: Arc<dyn TemplateSource>,
    pub cards: Arc<dyn CardStore>,
    /// Open editor sessions by id.
    pub sessions: RwLock<HashMap<String, EditorSession>>,
    /// Catalog fetched on first use.
    catalog: RwLock<Option<Arc<TemplateCatalog>>>,
}

impl AppState {
    pub fn new(templates: Arc<dyn TemplateSource>, cards: Arc<dyn CardStore>) -> Self {
        Self {
            templates,
            cards,
            sessions: RwLock::new(HashMap::new()),
            catalog: RwLock::new(None),
        }
    }

    /// Build state for the configured backend.
    pub async fn from_config(backend: &BackendConfig) -> Result<Self, CardError> {
        match backend {
            BackendConfig::Local { data_path } => {
                let store = match data_path {
                    Some(path) => LocalStore::open(path).await?,
                    None => LocalStore::in_memory(),
                };
                let store = Arc::new(store);
                Ok(Self::new(store.clone(), store))
            }
            BackendConfig::Hosted(config) => {
                let store = Arc::new(HostedStore::new(config.clone())?);
                Ok(Self::new(store.clone(), store))
            }
        }
    }

    /// Template catalog, fetched from the template source once and reused.
    /// A failed fetch is not cached.
    pub async fn catalog(&self) -> Result<Arc<TemplateCatalog>, CardError> {
        if let Some(catalog) = self.catalog.read().await.as_ref() {
            return Ok(catalog.clone());
        }

        let templates = self.templates.list_templates().await?;
        log::info!("Loaded {} templates", templates.len());
        let catalog = Arc::new(TemplateCatalog::new(templates));
        *self.catalog.write().await = Some(catalog.clone());
        Ok(catalog)
    }

    /// Drop sessions idle for `expiration` or longer. Returns how many were removed.
    pub async fn expire_sessions(&self, now: Instant, expiration: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_accessed) < expiration);
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::CardDraft;

    fn local_state() -> AppState {
        let store = Arc::new(LocalStore::in_memory());
        AppState::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_catalog_is_cached() {
        let state = local_state();
        let a = state.catalog().await.unwrap();
        let b = state.catalog().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.templates().len(), 8);
    }

    #[tokio::test]
    async fn test_expire_sessions() {
        let state = local_state();
        {
            let mut sessions = state.sessions.write().await;
            sessions.insert("old".into(), EditorSession::new(CardDraft::default()));
            sessions.insert("new".into(), EditorSession::new(CardDraft::default()));
        }
        let later = Instant::now() + Duration::from_secs(10);
        state.sessions.write().await.get_mut("new").unwrap().last_accessed = later;

        let removed = state.expire_sessions(later, Duration::from_secs(5)).await;
        assert_eq!(removed, 1);
        assert!(state.sessions.read().await.contains_key("new"));
    }

    #[test]
    fn test_describe_backend() {
        let local = BackendConfig::Local {
            data_path: Some(PathBuf::from("cards.json")),
        };
        assert_eq!(local.describe(), "local (cards.json)");
    }
}
