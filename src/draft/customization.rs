//! Override state for design attributes and font sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CardError;
use crate::template::Design;

use super::Side;

/// Default font sizes in pixels: name, title, details.
pub const DEFAULT_FONT_SIZES: FontSizes = FontSizes {
    name: 24,
    title: 16,
    details: 12,
};

/// One overridable attribute.
///
/// `Seeded` values were copied from a template (or a stored snapshot) and
/// follow the template when it changes. `Explicit` values were chosen by the
/// user and stay put until a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Override<T> {
    #[default]
    Unset,
    Seeded(T),
    Explicit(T),
}

impl<T> Override<T> {
    /// Current value, seeded or explicit.
    pub fn value(&self) -> Option<&T> {
        match self {
            Override::Unset => None,
            Override::Seeded(v) | Override::Explicit(v) => Some(v),
        }
    }

    pub fn explicit(&self) -> Option<&T> {
        match self {
            Override::Explicit(v) => Some(v),
            _ => None,
        }
    }

    pub fn seeded(&self) -> Option<&T> {
        match self {
            Override::Seeded(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Override::Explicit(_))
    }

    /// Replace a non-explicit value with `seed` (or clear it when `None`).
    pub fn reseed(&mut self, seed: Option<T>) {
        if !self.is_explicit() {
            self.reset(seed);
        }
    }

    /// Replace the value unconditionally, dropping any explicit mark.
    pub fn reset(&mut self, seed: Option<T>) {
        *self = match seed {
            Some(v) => Override::Seeded(v),
            None => Override::Unset,
        };
    }

    pub fn set(&mut self, value: T) {
        *self = Override::Explicit(value);
    }
}

/// Per-face overrides. `layout` is never set explicitly; it only carries the
/// template or snapshot layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideCustomization {
    pub background: Override<String>,
    pub text_color: Override<String>,
    pub layout: Override<String>,
}

impl SideCustomization {
    /// Customization seeded entirely from `design`.
    pub fn seeded_from(design: &Design) -> Self {
        let mut side = Self::default();
        side.reseed_from(Some(design));
        side
    }

    /// Re-seed non-explicit attributes from `design`; clear them when there
    /// is no design. Empty template values count as missing.
    pub fn reseed_from(&mut self, design: Option<&Design>) {
        self.background.reseed(design.and_then(|d| non_empty(&d.background)));
        self.text_color.reseed(design.and_then(|d| non_empty(&d.text_color)));
        self.layout.reseed(design.and_then(|d| non_empty(&d.layout)));
    }

    /// Seed every attribute from `design`, discarding explicit values.
    pub fn reset_from(&mut self, design: Option<&Design>) {
        self.background.reset(design.and_then(|d| non_empty(&d.background)));
        self.text_color.reset(design.and_then(|d| non_empty(&d.text_color)));
        self.layout.reset(design.and_then(|d| non_empty(&d.layout)));
    }
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Resolved font sizes, as stored in the front payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    pub name: u32,
    pub title: u32,
    pub details: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        DEFAULT_FONT_SIZES
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizeOverrides {
    pub name: Override<u32>,
    pub title: Override<u32>,
    pub details: Override<u32>,
}

impl FontSizeOverrides {
    /// All three sizes seeded with the defaults.
    pub fn seeded_defaults() -> Self {
        Self {
            name: Override::Seeded(DEFAULT_FONT_SIZES.name),
            title: Override::Seeded(DEFAULT_FONT_SIZES.title),
            details: Override::Seeded(DEFAULT_FONT_SIZES.details),
        }
    }

    pub fn resolve(&self) -> FontSizes {
        FontSizes {
            name: self.name.value().copied().unwrap_or(DEFAULT_FONT_SIZES.name),
            title: self.title.value().copied().unwrap_or(DEFAULT_FONT_SIZES.title),
            details: self
                .details
                .value()
                .copied()
                .unwrap_or(DEFAULT_FONT_SIZES.details),
        }
    }
}

/// Everything the user can override on a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub front: SideCustomization,
    pub back: SideCustomization,
    pub font_sizes: FontSizeOverrides,
}

impl Customization {
    pub fn side(&self, side: Side) -> &SideCustomization {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    /// True if any attribute carries an explicit mark.
    pub fn has_explicit(&self) -> bool {
        [&self.front, &self.back].iter().any(|s| {
            s.background.is_explicit() || s.text_color.is_explicit() || s.layout.is_explicit()
        }) || self.font_sizes.name.is_explicit()
            || self.font_sizes.title.is_explicit()
            || self.font_sizes.details.is_explicit()
    }
}

/// One customization leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomizationKey {
    FrontBackground,
    FrontTextColor,
    BackBackground,
    BackTextColor,
    NameFontSize,
    TitleFontSize,
    DetailsFontSize,
}

impl CustomizationKey {
    pub const ALL: [CustomizationKey; 7] = [
        CustomizationKey::FrontBackground,
        CustomizationKey::FrontTextColor,
        CustomizationKey::BackBackground,
        CustomizationKey::BackTextColor,
        CustomizationKey::NameFontSize,
        CustomizationKey::TitleFontSize,
        CustomizationKey::DetailsFontSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomizationKey::FrontBackground => "frontBackground",
            CustomizationKey::FrontTextColor => "frontTextColor",
            CustomizationKey::BackBackground => "backBackground",
            CustomizationKey::BackTextColor => "backTextColor",
            CustomizationKey::NameFontSize => "nameFontSize",
            CustomizationKey::TitleFontSize => "titleFontSize",
            CustomizationKey::DetailsFontSize => "detailsFontSize",
        }
    }

    pub fn is_font_size(&self) -> bool {
        matches!(
            self,
            CustomizationKey::NameFontSize
                | CustomizationKey::TitleFontSize
                | CustomizationKey::DetailsFontSize
        )
    }
}

impl fmt::Display for CustomizationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomizationKey {
    type Err = CardError;

    /// Accepts the camelCase wire name or its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect();
        CustomizationKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CardError::InvalidCustomization(format!("unknown key '{}'", s)))
    }
}

/// Value for [`CustomizationKey`]: a color string or a font size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomizationValue {
    FontSize(u32),
    Color(String),
}

impl CustomizationValue {
    pub(crate) fn into_color(self, key: CustomizationKey) -> Result<String, CardError> {
        match self {
            CustomizationValue::Color(c) => Ok(c),
            CustomizationValue::FontSize(n) => Err(CardError::InvalidCustomization(format!(
                "{} expects a color, got {}",
                key, n
            ))),
        }
    }

    pub(crate) fn into_font_size(self, key: CustomizationKey) -> Result<u32, CardError> {
        let size = match self {
            CustomizationValue::FontSize(n) => Some(n),
            CustomizationValue::Color(s) => s.trim().parse::<u32>().ok(),
        };
        match size {
            Some(n) if n > 0 => Ok(n),
            _ => Err(CardError::InvalidCustomization(format!(
                "{} expects a positive font size",
                key
            ))),
        }
    }
}

impl From<&str> for CustomizationValue {
    fn from(s: &str) -> Self {
        CustomizationValue::Color(s.to_string())
    }
}

impl From<String> for CustomizationValue {
    fn from(s: String) -> Self {
        CustomizationValue::Color(s)
    }
}

impl From<u32> for CustomizationValue {
    fn from(n: u32) -> Self {
        CustomizationValue::FontSize(n)
    }
}
