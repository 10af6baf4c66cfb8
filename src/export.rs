//! # Export Requests
//!
//! Rasterizing and PDF generation happen in an external renderer. This
//! module only describes what to render and what to call the file.
//!
//! ```
//! use cardsmith::export::{ExportFormat, export_filename};
//!
//! assert_eq!(
//!     export_filename("My  Work Card", ExportFormat::Document),
//!     "my-work-card-business-card.pdf"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::draft::{CardDraft, Side};
use crate::preview::CardPreview;
use crate::template::TemplateLookup;

/// Standard business card size in inches (landscape).
pub const CARD_WIDTH_IN: f32 = 3.5;
pub const CARD_HEIGHT_IN: f32 = 2.0;
/// Raster scale factor for image exports.
pub const IMAGE_SCALE: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// PNG image.
    #[default]
    #[serde(alias = "png")]
    Image,
    /// Single-page PDF.
    #[serde(alias = "pdf")]
    Document,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Image => "png",
            ExportFormat::Document => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Image => "image/png",
            ExportFormat::Document => "application/pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" | "png" => Ok(ExportFormat::Image),
            "document" | "pdf" => Ok(ExportFormat::Document),
            other => Err(format!(
                "Unknown export format '{}'. Use 'image' or 'document'",
                other
            )),
        }
    }
}

/// Everything the renderer needs for one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub card_name: String,
    pub format: ExportFormat,
    pub filename: String,
    pub mime_type: &'static str,
    pub width_in: f32,
    pub height_in: f32,
    pub scale: u32,
    /// The face to render.
    pub surface: CardPreview,
}

impl ExportRequest {
    pub fn new<L>(draft: &CardDraft, side: Side, format: ExportFormat, templates: &L) -> Self
    where
        L: TemplateLookup + ?Sized,
    {
        Self {
            card_name: draft.display_name.clone(),
            format,
            filename: export_filename(&draft.display_name, format),
            mime_type: format.mime_type(),
            width_in: CARD_WIDTH_IN,
            height_in: CARD_HEIGHT_IN,
            scale: IMAGE_SCALE,
            surface: CardPreview::for_side(draft, side, templates),
        }
    }
}

/// Lower-case the name and replace each whitespace run with a hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// `<slug>-business-card.<ext>`, or `business-card.<ext>` for a blank name.
///
/// The name is trimmed first, so surrounding whitespace never becomes a
/// leading or trailing hyphen.
pub fn export_filename(card_name: &str, format: ExportFormat) -> String {
    let slug = slugify(card_name.trim());
    if slug.is_empty() {
        format!("business-card.{}", format.extension())
    } else {
        format!("{}-business-card.{}", slug, format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateCatalog;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Business Card"), "my-business-card");
        assert_eq!(slugify("A\t\tB  C"), "a-b-c");
        assert_eq!(slugify("ÉCLAIR Co"), "éclair-co");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("My Business Card", ExportFormat::Image),
            "my-business-card-business-card.png"
        );
        assert_eq!(export_filename("  ", ExportFormat::Document), "business-card.pdf");
        assert_eq!(export_filename(" Sales ", ExportFormat::Image), "sales-business-card.png");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Document);
        assert_eq!("image".parse::<ExportFormat>().unwrap(), ExportFormat::Image);
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_json_accepts_extensions() {
        let pdf: ExportFormat = serde_json::from_str(r#""pdf""#).unwrap();
        let png: ExportFormat = serde_json::from_str(r#""png""#).unwrap();
        assert_eq!(pdf, ExportFormat::Document);
        assert_eq!(png, ExportFormat::Image);
        assert_eq!(serde_json::to_string(&pdf).unwrap(), r#""document""#);
    }

    #[test]
    fn test_export_request() {
        let catalog = TemplateCatalog::built_in();
        let draft = CardDraft::initialize(None, None).rename("Team Lead");
        let req = ExportRequest::new(&draft, Side::Back, ExportFormat::Document, &catalog);
        assert_eq!(req.filename, "team-lead-business-card.pdf");
        assert_eq!(req.mime_type, "application/pdf");
        assert_eq!(req.surface.side, Side::Back);
        assert_eq!((req.width_in, req.height_in), (3.5, 2.0));
    }
}
