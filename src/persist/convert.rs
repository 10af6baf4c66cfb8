//! Conversion between drafts and stored cards.

use crate::draft::{
    CardDraft, ContactFields, Customization, DEFAULT_FONT_SIZES, FontSizeOverrides, Override,
    Side, SideCustomization,
};
use crate::error::CardError;
use crate::template::{Design, Template};

use super::{BackPayload, FlattenedCard, FrontPayload, PersistedCard, StoredDesign};

/// Split a draft into its stored front and back payloads.
///
/// `design` in each payload is the non-explicit snapshot (normally the
/// template's design); explicit colors go to `customBackground` /
/// `customTextColor`. Fails when no template was resolved: a card is never
/// saved without a design to snapshot.
pub fn flatten(draft: &CardDraft, template: Option<&Template>) -> Result<FlattenedCard, CardError> {
    let template = template.ok_or(CardError::NoTemplateSelected)?;
    let c = &draft.customization;
    let contact = &draft.contact;

    let front_data = FrontPayload {
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        title: contact.title.clone(),
        company_name: contact.company_name.clone(),
        design: draft.base_design(Side::Front, Some(template)).into(),
        custom_background: c.front.background.explicit().cloned(),
        custom_text_color: c.front.text_color.explicit().cloned(),
        font_size: draft.resolve_font_sizes().into(),
    };

    let back_data = BackPayload {
        email: contact.email.clone(),
        phone: contact.phone.clone(),
        website: contact.website.clone(),
        address: contact.address.clone(),
        design: draft.base_design(Side::Back, Some(template)).into(),
        custom_background: c.back.background.explicit().cloned(),
        custom_text_color: c.back.text_color.explicit().cloned(),
    };

    Ok(FlattenedCard {
        front_data,
        back_data,
    })
}

/// Flatten and wrap into a full card record, ready for insert or update.
pub fn to_persisted_card(
    draft: &CardDraft,
    template: Option<&Template>,
) -> Result<PersistedCard, CardError> {
    let FlattenedCard {
        front_data,
        back_data,
    } = flatten(draft, template)?;
    Ok(PersistedCard {
        id: draft.card_id.clone(),
        name: draft.display_name.clone(),
        template_id: template.map(|t| t.id.clone()),
        front_data,
        back_data,
        created_at: None,
        updated_at: None,
    })
}

/// Read a stored card back into a draft.
///
/// Per attribute: a stored custom value becomes an explicit override, the
/// stored design snapshot a seeded one, and failing both the referenced
/// template's value is seeded. Anything still missing stays unset and
/// resolves to the literal fallbacks.
pub fn restore(card: &PersistedCard, template: Option<&Template>) -> CardDraft {
    let template = template.filter(|t| {
        card.template_id
            .as_deref()
            .is_none_or(|id| id == t.id)
    });
    let front = &card.front_data;
    let back = &card.back_data;

    let contact = ContactFields {
        first_name: front.first_name.clone(),
        last_name: front.last_name.clone(),
        title: front.title.clone(),
        company_name: front.company_name.clone(),
        email: back.email.clone(),
        phone: back.phone.clone(),
        website: back.website.clone(),
        address: back.address.clone(),
    };

    let customization = Customization {
        front: restore_side(
            &front.design,
            front.custom_background.as_ref(),
            front.custom_text_color.as_ref(),
            template.map(|t| &t.front_design),
        ),
        back: restore_side(
            &back.design,
            back.custom_background.as_ref(),
            back.custom_text_color.as_ref(),
            template.map(|t| &t.back_design),
        ),
        font_sizes: FontSizeOverrides {
            name: restore_font_size(front.font_size.name, DEFAULT_FONT_SIZES.name),
            title: restore_font_size(front.font_size.title, DEFAULT_FONT_SIZES.title),
            details: restore_font_size(front.font_size.details, DEFAULT_FONT_SIZES.details),
        },
    };

    CardDraft {
        display_name: card.name.clone(),
        contact,
        template_id: card
            .template_id
            .clone()
            .or_else(|| template.map(|t| t.id.clone())),
        card_id: card.id.clone(),
        customization,
    }
}

fn restore_side(
    stored: &StoredDesign,
    custom_background: Option<&String>,
    custom_text_color: Option<&String>,
    template: Option<&Design>,
) -> SideCustomization {
    SideCustomization {
        background: restore_attr(
            custom_background,
            stored.background.as_ref(),
            template.map(|d| &d.background),
        ),
        text_color: restore_attr(
            custom_text_color,
            stored.text_color.as_ref(),
            template.map(|d| &d.text_color),
        ),
        layout: restore_attr(None, stored.layout.as_ref(), template.map(|d| &d.layout)),
    }
}

fn restore_attr(
    custom: Option<&String>,
    stored: Option<&String>,
    template: Option<&String>,
) -> Override<String> {
    if let Some(value) = custom {
        return Override::Explicit(value.clone());
    }
    match stored
        .into_iter()
        .chain(template)
        .find(|s| !s.trim().is_empty())
    {
        Some(value) => Override::Seeded(value.clone()),
        None => Override::Unset,
    }
}

fn restore_font_size(stored: Option<u32>, default: u32) -> Override<u32> {
    match stored {
        Some(n) if n != default => Override::Explicit(n),
        _ => Override::Seeded(default),
    }
}
