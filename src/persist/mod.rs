//! # Persisted Cards
//!
//! The stored form of a card is two independent payloads, one per face.
//! Each carries its contact text plus the design snapshot it was saved with,
//! so a card stays renderable after its template leaves the catalog.
//!
//! Reading is forgiving: absent or wrong-typed fields are treated as absent
//! and the draft falls back to template or literal values.
//!
//! ## Example
//!
//! ```
//! use cardsmith::draft::{CardDraft, CustomizationKey};
//! use cardsmith::persist::flatten;
//! use cardsmith::template::{Design, Template};
//!
//! let t1 = Template {
//!     id: "t1".into(),
//!     name: "T1".into(),
//!     description: None,
//!     category: None,
//!     premium: false,
//!     front_design: Design::new("#000", "#fff", "x"),
//!     back_design: Design::new("#fff", "#000", "y"),
//! };
//! let draft = CardDraft::initialize(Some(&t1), None)
//!     .set_customization(CustomizationKey::FrontBackground, "#ff0000".into())?;
//!
//! let card = flatten(&draft, Some(&t1))?;
//! assert_eq!(card.front_data.design.background.as_deref(), Some("#000"));
//! assert_eq!(card.front_data.custom_background.as_deref(), Some("#ff0000"));
//! # Ok::<(), cardsmith::CardError>(())
//! ```

mod convert;
pub(crate) mod lenient;

pub use convert::{flatten, restore, to_persisted_card};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::FontSizes;
use crate::template::Design;

/// Design as stored in a payload. Every attribute may be missing in old data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDesign {
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub background: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub layout: Option<String>,
}

impl From<Design> for StoredDesign {
    fn from(d: Design) -> Self {
        Self {
            background: Some(d.background),
            text_color: Some(d.text_color),
            layout: Some(d.layout),
        }
    }
}

/// Font sizes as stored; see [`FontSizes`] for the resolved form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFontSizes {
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub name: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub title: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_u32", skip_serializing_if = "Option::is_none")]
    pub details: Option<u32>,
}

impl From<FontSizes> for StoredFontSizes {
    fn from(f: FontSizes) -> Self {
        Self {
            name: Some(f.name),
            title: Some(f.title),
            details: Some(f.details),
        }
    }
}

/// Front face: identity text, design snapshot, explicit colors, font sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontPayload {
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub design: StoredDesign,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_background: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub font_size: StoredFontSizes,
}

/// Back face: contact text, design snapshot, explicit colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackPayload {
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub design: StoredDesign,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_background: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_text_color: Option<String>,
}

/// The two payloads produced by [`flatten`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedCard {
    pub front_data: FrontPayload,
    pub back_data: BackPayload,
}

/// A card as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCard {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub template_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub front_data: FrontPayload,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub back_data: BackPayload,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
