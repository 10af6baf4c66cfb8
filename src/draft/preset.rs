//! Color presets: four colors applied to both faces in one step.

use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// Front/back background and text colors. Backgrounds may be gradients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPreset {
    #[serde(default)]
    pub name: String,
    pub front_background: String,
    pub front_text_color: String,
    pub back_background: String,
    pub back_text_color: String,
}

impl ColorPreset {
    pub fn new(
        name: &str,
        front_background: &str,
        front_text_color: &str,
        back_background: &str,
        back_text_color: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            front_background: front_background.to_string(),
            front_text_color: front_text_color.to_string(),
            back_background: back_background.to_string(),
            back_text_color: back_text_color.to_string(),
        }
    }

    /// Presets offered by the design panel.
    pub fn built_in() -> Vec<Self> {
        vec![
            Self::new("Classic", "#ffffff", "#000000", "#f8f8f8", "#333333"),
            Self::new("Midnight", "#0f172a", "#f8fafc", "#1e293b", "#cbd5e1"),
            Self::new("Ocean", "#0e7490", "#ecfeff", "#ecfeff", "#155e75"),
            Self::new("Forest", "#14532d", "#f0fdf4", "#f0fdf4", "#14532d"),
            Self::new(
                "Sunset",
                "linear-gradient(135deg, #f97316, #db2777)",
                "#ffffff",
                "#fff1f2",
                "#9f1239",
            ),
            Self::new("Monochrome", "#18181b", "#fafafa", "#fafafa", "#18181b"),
        ]
    }

    /// Look up a built-in preset by name, ignoring case.
    pub fn by_name(name: &str) -> Result<Self, CardError> {
        Self::built_in()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| CardError::UnknownPreset(name.to_string()))
    }
}
