//! Design resolution.
//!
//! Precedence for every attribute: override value (explicit or seeded), then
//! the selected template's design, then a literal fallback. Resolution never
//! fails; an unknown template id simply falls through to the literals.

use crate::template::{Design, Template, TemplateLookup};

use super::customization::{non_empty, SideCustomization};
use super::{CardDraft, Side};

pub const FRONT_BACKGROUND: &str = "#ffffff";
pub const FRONT_TEXT_COLOR: &str = "#000000";
pub const BACK_BACKGROUND: &str = "#f8f8f8";
pub const BACK_TEXT_COLOR: &str = "#333333";
pub const DEFAULT_LAYOUT: &str = "standard";

/// Literal design used when neither an override nor a template supplies a value.
pub fn fallback_design(side: Side) -> Design {
    match side {
        Side::Front => Design::new(FRONT_BACKGROUND, FRONT_TEXT_COLOR, DEFAULT_LAYOUT),
        Side::Back => Design::new(BACK_BACKGROUND, BACK_TEXT_COLOR, DEFAULT_LAYOUT),
    }
}

fn template_design(template: &Template, side: Side) -> &Design {
    match side {
        Side::Front => &template.front_design,
        Side::Back => &template.back_design,
    }
}

impl CardDraft {
    /// The selected template, if its id resolves.
    pub fn selected_template<'a, L>(&self, templates: &'a L) -> Option<&'a Template>
    where
        L: TemplateLookup + ?Sized,
    {
        self.template_id
            .as_deref()
            .and_then(|id| templates.template(id))
    }

    /// Effective design for one face.
    pub fn resolve_design<L>(&self, side: Side, templates: &L) -> Design
    where
        L: TemplateLookup + ?Sized,
    {
        let template = self.selected_template(templates);
        merge(
            self.customization.side(side),
            template.map(|t| template_design(t, side)),
            side,
            true,
        )
    }

    /// Design with explicit overrides left out: seeded values, then
    /// `template`, then literals. This is the snapshot a saved card stores
    /// under `design`.
    pub(crate) fn base_design(&self, side: Side, template: Option<&Template>) -> Design {
        merge(
            self.customization.side(side),
            template.map(|t| template_design(t, side)),
            side,
            false,
        )
    }
}

fn merge(
    custom: &SideCustomization,
    template: Option<&Design>,
    side: Side,
    include_explicit: bool,
) -> Design {
    let fallback = fallback_design(side);
    let pick = |o: &super::Override<String>, from_template: Option<&String>, literal: String| {
        let chosen = if include_explicit {
            o.value()
        } else {
            o.seeded()
        };
        chosen
            .cloned()
            .or_else(|| from_template.and_then(|s| non_empty(s)))
            .unwrap_or(literal)
    };

    Design {
        background: pick(
            &custom.background,
            template.map(|d| &d.background),
            fallback.background,
        ),
        text_color: pick(
            &custom.text_color,
            template.map(|d| &d.text_color),
            fallback.text_color,
        ),
        layout: pick(&custom.layout, template.map(|d| &d.layout), fallback.layout),
    }
}
