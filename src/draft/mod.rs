//! # Card Drafts
//!
//! A [`CardDraft`] is the in-memory state of a card being edited: contact
//! text, the selected template, and per-attribute overrides. Every editing
//! operation consumes the draft and returns the updated value, so a caller
//! holding an older copy never sees it change underneath it.
//!
//! ## Example
//!
//! ```
//! use cardsmith::draft::{CardDraft, ContactField, CustomizationKey, Side};
//! use cardsmith::template::{TemplateCatalog, TemplateLookup};
//!
//! let catalog = TemplateCatalog::built_in();
//! let draft = CardDraft::initialize(catalog.template("corporate-blue"), None)
//!     .update_field(ContactField::FirstName, "Ada")
//!     .set_customization(CustomizationKey::FrontBackground, "#ff0000".into())?;
//!
//! assert_eq!(draft.resolve_design(Side::Front, &catalog).background, "#ff0000");
//! assert_eq!(draft.resolve_design(Side::Back, &catalog).background, "#eff6ff");
//! # Ok::<(), cardsmith::CardError>(())
//! ```

mod customization;
mod edit;
mod preset;
mod resolve;

pub use customization::{
    Customization, CustomizationKey, CustomizationValue, DEFAULT_FONT_SIZES, FontSizeOverrides,
    FontSizes, Override, SideCustomization,
};
pub use edit::{DraftEdit, PresetChoice};
pub use preset::ColorPreset;
pub use resolve::fallback_design;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;
use crate::persist::PersistedCard;
use crate::template::{Template, TemplateLookup};

/// Display name given to new drafts.
pub const DEFAULT_DISPLAY_NAME: &str = "My Business Card";

/// Card face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            other => Err(format!("Unknown side '{}'. Use 'front' or 'back'", other)),
        }
    }
}

/// Which editor panel is active. Purely a view concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Content,
    Design,
}

/// Contact text on the card. No format validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
}

/// Names one of the [`ContactFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Title,
    CompanyName,
    Email,
    Phone,
    Website,
    Address,
}

impl ContactField {
    pub const ALL: [ContactField; 8] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Title,
        ContactField::CompanyName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Website,
        ContactField::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::Title => "title",
            ContactField::CompanyName => "companyName",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Website => "website",
            ContactField::Address => "address",
        }
    }

    /// Face the field is printed on.
    pub fn side(&self) -> Side {
        match self {
            ContactField::FirstName
            | ContactField::LastName
            | ContactField::Title
            | ContactField::CompanyName => Side::Front,
            _ => Side::Back,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = CardError;

    /// Accepts `firstName` or `first_name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        ContactField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CardError::InvalidField(format!("unknown contact field '{}'", s)))
    }
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Title => &self.title,
            ContactField::CompanyName => &self.company_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Website => &self.website,
            ContactField::Address => &self.address,
        }
    }

    fn slot(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Title => &mut self.title,
            ContactField::CompanyName => &mut self.company_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Website => &mut self.website,
            ContactField::Address => &mut self.address,
        }
    }
}

/// In-progress card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    /// Label for the saved card; not printed.
    pub display_name: String,
    #[serde(rename = "contactFields")]
    pub contact: ContactFields,
    pub template_id: Option<String>,
    /// Stored card this draft was opened from. Saving updates it.
    pub card_id: Option<String>,
    pub customization: Customization,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            contact: ContactFields::default(),
            template_id: None,
            card_id: None,
            customization: Customization::default(),
        }
    }
}

impl CardDraft {
    /// Build a draft.
    ///
    /// - With `existing`, the draft is read back from the stored payloads;
    ///   `template` is the card's referenced template and only fills in
    ///   design values the payloads lack.
    /// - With only `template`, both faces are seeded from it and font sizes
    ///   start at the defaults.
    /// - With neither, everything is unset and resolution uses the literal
    ///   fallback colors.
    pub fn initialize(template: Option<&Template>, existing: Option<&PersistedCard>) -> Self {
        if let Some(card) = existing {
            return crate::persist::restore(card, template);
        }

        let mut draft = Self::default();
        if let Some(template) = template {
            draft.template_id = Some(template.id.clone());
            draft.customization = Customization {
                front: SideCustomization::seeded_from(&template.front_design),
                back: SideCustomization::seeded_from(&template.back_design),
                font_sizes: FontSizeOverrides::seeded_defaults(),
            };
        }
        draft
    }

    /// Replace one contact field. Any string is accepted, including "".
    pub fn update_field(mut self, field: ContactField, value: impl Into<String>) -> Self {
        *self.contact.slot(field) = value.into();
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Select a template by id.
    ///
    /// Non-explicit color and layout overrides are re-seeded from the new
    /// template, or cleared when the id doesn't resolve. Explicit overrides
    /// and font sizes are left alone.
    pub fn select_template<L>(mut self, template_id: &str, templates: &L) -> Self
    where
        L: TemplateLookup + ?Sized,
    {
        let template = templates.template(template_id);
        self.template_id = Some(template_id.to_string());
        self.customization
            .front
            .reseed_from(template.map(|t| &t.front_design));
        self.customization
            .back
            .reseed_from(template.map(|t| &t.back_design));
        self
    }

    /// Set one override and mark it explicit.
    pub fn set_customization(
        mut self,
        key: CustomizationKey,
        value: CustomizationValue,
    ) -> Result<Self, CardError> {
        let c = &mut self.customization;
        match key {
            CustomizationKey::FrontBackground => c.front.background.set(value.into_color(key)?),
            CustomizationKey::FrontTextColor => c.front.text_color.set(value.into_color(key)?),
            CustomizationKey::BackBackground => c.back.background.set(value.into_color(key)?),
            CustomizationKey::BackTextColor => c.back.text_color.set(value.into_color(key)?),
            CustomizationKey::NameFontSize => c.font_sizes.name.set(value.into_font_size(key)?),
            CustomizationKey::TitleFontSize => c.font_sizes.title.set(value.into_font_size(key)?),
            CustomizationKey::DetailsFontSize => {
                c.font_sizes.details.set(value.into_font_size(key)?)
            }
        }
        Ok(self)
    }

    /// Set all four colors from `preset`, marking each explicit.
    pub fn apply_color_preset(mut self, preset: &ColorPreset) -> Self {
        let c = &mut self.customization;
        c.front.background.set(preset.front_background.clone());
        c.front.text_color.set(preset.front_text_color.clone());
        c.back.background.set(preset.back_background.clone());
        c.back.text_color.set(preset.back_text_color.clone());
        self
    }

    /// Drop every explicit override: colors come back from the current
    /// template and font sizes return to the defaults.
    pub fn reset_to_template_defaults<L>(mut self, templates: &L) -> Self
    where
        L: TemplateLookup + ?Sized,
    {
        let template = self.selected_template(templates);
        let front = template.map(|t| &t.front_design);
        let back = template.map(|t| &t.back_design);
        self.customization.front.reset_from(front);
        self.customization.back.reset_from(back);
        self.customization.font_sizes = FontSizeOverrides::seeded_defaults();
        self
    }

    pub fn resolve_font_sizes(&self) -> FontSizes {
        self.customization.font_sizes.resolve()
    }
}
