//! Draft edits as data.
//!
//! The editor sends one [`DraftEdit`] per user action. The JSON form is
//! tagged by `op`:
//!
//! ```json
//! {"op": "update_field", "field": "email", "value": "ada@example.com"}
//! {"op": "set_customization", "key": "frontBackground", "value": "#ff0000"}
//! {"op": "apply_preset", "preset": "Ocean"}
//! {"op": "reset"}
//! ```

use serde::Deserialize;

use crate::error::CardError;
use crate::template::TemplateLookup;

use super::{CardDraft, ColorPreset, CustomizationKey, CustomizationValue};

/// A single editing action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftEdit {
    UpdateField {
        field: String,
        #[serde(default)]
        value: String,
    },
    Rename {
        name: String,
    },
    SelectTemplate {
        #[serde(alias = "templateId")]
        template_id: String,
    },
    SetCustomization {
        key: String,
        value: CustomizationValue,
    },
    ApplyPreset {
        preset: PresetChoice,
    },
    Reset,
}

/// A built-in preset by name, or four colors inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PresetChoice {
    Named(String),
    Inline(ColorPreset),
}

impl PresetChoice {
    pub fn resolve(self) -> Result<ColorPreset, CardError> {
        match self {
            PresetChoice::Named(name) => ColorPreset::by_name(&name),
            PresetChoice::Inline(preset) => Ok(preset),
        }
    }
}

impl DraftEdit {
    /// Apply this edit to `draft`. Unknown field or key names are errors; an
    /// unknown template id is not (the draft falls back to literal colors).
    pub fn apply<L>(self, draft: CardDraft, templates: &L) -> Result<CardDraft, CardError>
    where
        L: TemplateLookup + ?Sized,
    {
        match self {
            DraftEdit::UpdateField { field, value } => {
                Ok(draft.update_field(field.parse()?, value))
            }
            DraftEdit::Rename { name } => Ok(draft.rename(name)),
            DraftEdit::SelectTemplate { template_id } => {
                Ok(draft.select_template(&template_id, templates))
            }
            DraftEdit::SetCustomization { key, value } => {
                let key: CustomizationKey = key.parse()?;
                draft.set_customization(key, value)
            }
            DraftEdit::ApplyPreset { preset } => Ok(draft.apply_color_preset(&preset.resolve()?)),
            DraftEdit::Reset => Ok(draft.reset_to_template_defaults(templates)),
        }
    }
}
