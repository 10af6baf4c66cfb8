//! # Card Preview
//!
//! The view model a renderer needs to draw one face: the resolved design
//! plus the text lines in order. Empty fields show placeholder text so the
//! layout can be judged before anything is typed.

use serde::Serialize;

use crate::draft::{CardDraft, ContactField, FontSizes, Side};
use crate::template::{Design, TemplateLookup};

/// What a line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Name,
    Title,
    Company,
    Heading,
    Contact,
    Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewLine {
    pub role: LineRole,
    pub text: String,
    pub font_size: u32,
    /// True when `text` is placeholder copy rather than user input.
    pub placeholder: bool,
}

/// One rendered face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardPreview {
    pub side: Side,
    pub design: Design,
    pub font_sizes: FontSizes,
    pub lines: Vec<PreviewLine>,
}

/// Placeholder copy for an empty field.
pub fn placeholder(field: ContactField) -> &'static str {
    match field {
        ContactField::FirstName => "First",
        ContactField::LastName => "Last",
        ContactField::Title => "Job Title",
        ContactField::CompanyName => "Company Name",
        ContactField::Email => "email@example.com",
        ContactField::Phone => "+1 (555) 123-4567",
        ContactField::Website => "www.example.com",
        ContactField::Address => "123 Business St, New York, NY",
    }
}

impl CardPreview {
    pub fn for_side<L>(draft: &CardDraft, side: Side, templates: &L) -> Self
    where
        L: TemplateLookup + ?Sized,
    {
        let sizes = draft.resolve_font_sizes();
        let field = |f: ContactField| {
            let value = draft.contact.get(f);
            if value.trim().is_empty() {
                (placeholder(f).to_string(), true)
            } else {
                (value.to_string(), false)
            }
        };
        let line = |role: LineRole, (text, placeholder): (String, bool), font_size: u32| PreviewLine {
            role,
            text,
            font_size,
            placeholder,
        };

        let lines = match side {
            Side::Front => {
                // Placeholders apply per name part, like the editor preview.
                let (first, first_ph) = field(ContactField::FirstName);
                let (last, last_ph) = field(ContactField::LastName);
                vec![
                    line(
                        LineRole::Name,
                        (format!("{} {}", first, last), first_ph && last_ph),
                        sizes.name,
                    ),
                    line(LineRole::Title, field(ContactField::Title), sizes.title),
                    line(LineRole::Company, field(ContactField::CompanyName), sizes.details),
                ]
            }
            Side::Back => vec![
                line(LineRole::Heading, ("Contact".to_string(), false), sizes.details),
                line(LineRole::Contact, field(ContactField::Email), sizes.details),
                line(LineRole::Contact, field(ContactField::Phone), sizes.details),
                line(LineRole::Contact, field(ContactField::Website), sizes.details),
                line(LineRole::Address, field(ContactField::Address), sizes.details),
            ],
        };

        Self {
            side,
            design: draft.resolve_design(side, templates),
            font_sizes: sizes,
            lines,
        }
    }
}
