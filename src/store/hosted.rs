//! Hosted store: a PostgREST-style REST API (`/rest/v1/<table>`).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response};

use crate::error::CardError;
use crate::persist::PersistedCard;
use crate::template::Template;

use super::{CardStore, TemplateSource};

pub const TEMPLATES_TABLE: &str = "business_card_templates";
pub const CARDS_TABLE: &str = "business_cards";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedConfig {
    /// Project URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Public API key, sent as `apikey`.
    pub api_key: String,
    /// Signed-in user's token. Falls back to the API key for `Authorization`.
    pub access_token: Option<String>,
    /// Owning user. When set, inserts carry `user_id` and listings are
    /// limited to that user's cards, as row-level security expects.
    pub owner_id: Option<String>,
}

pub struct HostedStore {
    client: reqwest::Client,
    config: HostedConfig,
}

impl HostedStore {
    pub fn new(config: HostedConfig) -> Result<Self, CardError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cardsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CardError::Backend(format!("HTTP client error: {}", e)))?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let token = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.api_key);
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }

    fn list_request(&self) -> RequestBuilder {
        let request = self
            .request(Method::GET, CARDS_TABLE)
            .query(&[("select", "*"), ("order", "created_at.asc")]);
        match &self.config.owner_id {
            Some(owner) => request.query(&[("user_id", format!("eq.{}", owner))]),
            None => request,
        }
    }

    /// Insert body: the card without store-assigned fields, plus the owner.
    fn insert_body(&self, mut card: PersistedCard) -> Result<serde_json::Value, CardError> {
        card.id = None;
        card.created_at = None;
        card.updated_at = None;
        let mut body = serde_json::to_value(card)?;
        if let (Some(owner), Some(fields)) = (&self.config.owner_id, body.as_object_mut()) {
            fields.insert("user_id".to_string(), owner.clone().into());
        }
        Ok(body)
    }

    fn card_request(&self, method: Method, id: &str) -> RequestBuilder {
        self.request(method, CARDS_TABLE)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
    }
}

/// Turn a non-2xx response into a backend error carrying the body text.
async fn check(response: Response) -> Result<Response, CardError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CardError::Backend(format!("HTTP {}: {}", status, body)))
}

async fn rows(response: Response) -> Result<Vec<PersistedCard>, CardError> {
    Ok(check(response).await?.json().await?)
}

fn first_row(rows: Vec<PersistedCard>, id: &str) -> Result<PersistedCard, CardError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| CardError::CardNotFound(id.to_string()))
}

/// Template rows without a usable id are skipped.
fn parse_templates(rows: Vec<serde_json::Value>) -> Vec<Template> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Template>(row) {
            Ok(t) if !t.id.is_empty() => Some(t),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Skipping malformed template row: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl TemplateSource for HostedStore {
    async fn list_templates(&self) -> Result<Vec<Template>, CardError> {
        let response = self
            .request(Method::GET, TEMPLATES_TABLE)
            .query(&[("select", "*")])
            .send()
            .await?;
        let rows: Vec<serde_json::Value> = check(response).await?.json().await?;
        Ok(parse_templates(rows))
    }
}

#[async_trait]
impl CardStore for HostedStore {
    async fn list_cards(&self) -> Result<Vec<PersistedCard>, CardError> {
        let response = self.list_request().send().await?;
        rows(response).await
    }

    async fn get_card(&self, id: &str) -> Result<PersistedCard, CardError> {
        let response = self
            .request(Method::GET, CARDS_TABLE)
            .query(&[("select", "*")])
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        first_row(rows(response).await?, id)
    }

    async fn insert_card(&self, card: PersistedCard) -> Result<PersistedCard, CardError> {
        // The database assigns id and timestamps.
        let body = self.insert_body(card)?;
        let response = self
            .request(Method::POST, CARDS_TABLE)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CardError::Backend("Insert returned no rows".to_string()))
    }

    async fn update_card(
        &self,
        id: &str,
        mut card: PersistedCard,
    ) -> Result<PersistedCard, CardError> {
        card.id = None;
        card.created_at = None;
        card.updated_at = Some(Utc::now());
        let response = self
            .card_request(Method::PATCH, id)
            .json(&card)
            .send()
            .await?;
        first_row(rows(response).await?, id)
    }

    async fn delete_card(&self, id: &str) -> Result<(), CardError> {
        let response = self.card_request(Method::DELETE, id).send().await?;
        first_row(rows(response).await?, id).map(|_| ())
    }
}
