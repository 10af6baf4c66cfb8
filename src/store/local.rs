//! Local card store: an in-memory map, optionally persisted to a JSON file.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::CardError;
use crate::persist::PersistedCard;
use crate::template::{Template, TemplateCatalog};

use super::{CardStore, TemplateSource};

/// Cards kept in memory. With a path, the file is read on open and rewritten
/// after every change.
pub struct LocalStore {
    cards: RwLock<HashMap<String, PersistedCard>>,
    path: Option<PathBuf>,
    templates: Vec<Template>,
}

impl LocalStore {
    /// Empty store serving the built-in templates.
    pub fn in_memory() -> Self {
        Self {
            cards: RwLock::new(HashMap::new()),
            path: None,
            templates: TemplateCatalog::built_in().templates().to_vec(),
        }
    }

    /// Open a file-backed store. A missing file starts empty.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CardError> {
        let path = path.as_ref().to_path_buf();
        let cards = match tokio::fs::read(&path).await {
            Ok(bytes) => parse_cards(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Loaded {} cards from {}", cards.len(), path.display());

        Ok(Self {
            cards: RwLock::new(cards),
            path: Some(path),
            ..Self::in_memory()
        })
    }

    /// Replace the template list served by this store.
    pub fn with_templates(mut self, templates: Vec<Template>) -> Self {
        self.templates = templates;
        self
    }

    async fn write_through(&self, cards: &HashMap<String, PersistedCard>) -> Result<(), CardError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(&sorted(cards.values().cloned().collect()))?;
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

/// Parse a stored card list, giving id-less records a fresh id.
/// Records that aren't cards at all are skipped.
fn parse_cards(bytes: &[u8]) -> Result<HashMap<String, PersistedCard>, CardError> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let mut cards = HashMap::with_capacity(records.len());
    for record in records {
        let mut card: PersistedCard = match serde_json::from_value(record) {
            Ok(card) => card,
            Err(e) => {
                log::warn!("Skipping malformed card record: {}", e);
                continue;
            }
        };
        let id = card.id.clone().unwrap_or_else(new_id);
        card.id = Some(id.clone());
        cards.insert(id, card);
    }
    Ok(cards)
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Oldest first; ties broken by id for a stable order.
fn sorted(mut cards: Vec<PersistedCard>) -> Vec<PersistedCard> {
    cards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    cards
}

#[async_trait]
impl TemplateSource for LocalStore {
    async fn list_templates(&self) -> Result<Vec<Template>, CardError> {
        Ok(self.templates.clone())
    }
}

#[async_trait]
impl CardStore for LocalStore {
    async fn list_cards(&self) -> Result<Vec<PersistedCard>, CardError> {
        let cards = self.cards.read().await;
        Ok(sorted(cards.values().cloned().collect()))
    }

    async fn get_card(&self, id: &str) -> Result<PersistedCard, CardError> {
        let cards = self.cards.read().await;
        cards
            .get(id)
            .cloned()
            .ok_or_else(|| CardError::CardNotFound(id.to_string()))
    }

    async fn insert_card(&self, mut card: PersistedCard) -> Result<PersistedCard, CardError> {
        let now = Utc::now();
        let id = new_id();
        card.id = Some(id.clone());
        card.created_at = Some(now);
        card.updated_at = Some(now);

        let mut cards = self.cards.write().await;
        cards.insert(id.clone(), card.clone());
        if let Err(e) = self.write_through(&cards).await {
            cards.remove(&id);
            return Err(e);
        }
        log::debug!("Inserted card {}", id);
        Ok(card)
    }

    async fn update_card(
        &self,
        id: &str,
        mut card: PersistedCard,
    ) -> Result<PersistedCard, CardError> {
        let mut cards = self.cards.write().await;
        let previous = cards
            .get(id)
            .cloned()
            .ok_or_else(|| CardError::CardNotFound(id.to_string()))?;

        card.id = Some(id.to_string());
        card.created_at = previous.created_at;
        card.updated_at = Some(Utc::now());
        cards.insert(id.to_string(), card.clone());
        if let Err(e) = self.write_through(&cards).await {
            cards.insert(id.to_string(), previous);
            return Err(e);
        }
        log::debug!("Updated card {}", id);
        Ok(card)
    }

    async fn delete_card(&self, id: &str) -> Result<(), CardError> {
        let mut cards = self.cards.write().await;
        let previous = cards
            .remove(id)
            .ok_or_else(|| CardError::CardNotFound(id.to_string()))?;
        if let Err(e) = self.write_through(&cards).await {
            cards.insert(id.to_string(), previous);
            return Err(e);
        }
        log::debug!("Deleted card {}", id);
        Ok(())
    }
}
