//! # Stores
//!
//! Collaborator interfaces for the template catalog and for saved cards,
//! with two backends:
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`LocalStore`] | In-process map, optionally written through to a JSON file |
//! | [`HostedStore`] | REST client for a hosted PostgREST-style database |
//!
//! Stores never interpret card contents; they assign ids and timestamps and
//! hand payloads back as stored.

mod hosted;
mod local;

pub use hosted::{HostedConfig, HostedStore};
pub use local::LocalStore;

use async_trait::async_trait;

use crate::error::CardError;
use crate::persist::PersistedCard;
use crate::template::Template;

/// Source of the template catalog.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn list_templates(&self) -> Result<Vec<Template>, CardError>;
}

/// Storage for saved cards.
#[async_trait]
pub trait CardStore: Send + Sync {
    async fn list_cards(&self) -> Result<Vec<PersistedCard>, CardError>;

    async fn get_card(&self, id: &str) -> Result<PersistedCard, CardError>;

    /// Store a new card. The store assigns `id`, `created_at` and `updated_at`.
    async fn insert_card(&self, card: PersistedCard) -> Result<PersistedCard, CardError>;

    /// Replace the payloads of an existing card. `created_at` is kept.
    async fn update_card(&self, id: &str, card: PersistedCard)
    -> Result<PersistedCard, CardError>;

    async fn delete_card(&self, id: &str) -> Result<(), CardError>;
}

/// Insert `card`, or update it when it already carries an id.
pub async fn save_card<S>(store: &S, card: PersistedCard) -> Result<PersistedCard, CardError>
where
    S: CardStore + ?Sized,
{
    match card.id.clone() {
        Some(id) => store.update_card(&id, card).await,
        None => store.insert_card(card).await,
    }
}
