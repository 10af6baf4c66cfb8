//! # Composition Tests
//!
//! End-to-end checks of the draft model: resolution against templates,
//! template switching, presets, reset, and the save/load round trip.

use cardsmith::draft::{
    CardDraft, ColorPreset, ContactField, CustomizationKey, DraftEdit, Side,
};
use cardsmith::persist::{PersistedCard, flatten, to_persisted_card};
use cardsmith::template::{Design, Template, TemplateCatalog, TemplateLookup};
use pretty_assertions::assert_eq;
use serde_json::json;

fn t1() -> Template {
    Template {
        id: "t1".into(),
        name: "T1".into(),
        description: None,
        category: None,
        premium: false,
        front_design: Design::new("#000", "#fff", "x"),
        back_design: Design::new("#fff", "#000", "y"),
    }
}

fn both_sides<L: TemplateLookup + ?Sized>(draft: &CardDraft, templates: &L) -> (Design, Design) {
    (
        draft.resolve_design(Side::Front, templates),
        draft.resolve_design(Side::Back, templates),
    )
}

/// Reload a draft the way the editor does after a save.
fn reload(draft: &CardDraft, catalog: &TemplateCatalog) -> CardDraft {
    let template = draft.selected_template(catalog);
    let card = to_persisted_card(draft, template).unwrap();
    let json = serde_json::to_value(&card).unwrap();
    let stored: PersistedCard = serde_json::from_value(json).unwrap();
    CardDraft::initialize(template, Some(&stored))
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_fresh_draft_matches_every_template() {
    let catalog = TemplateCatalog::built_in();
    for template in catalog.templates() {
        let draft = CardDraft::initialize(Some(template), None);
        assert_eq!(
            both_sides(&draft, &catalog),
            (template.front_design.clone(), template.back_design.clone()),
            "template {}",
            template.id
        );
    }
}

#[test]
fn test_explicit_background_survives_template_switches() {
    let catalog = TemplateCatalog::built_in();
    let mut draft = CardDraft::initialize(catalog.first(), None)
        .set_customization(CustomizationKey::FrontBackground, "#123456".into())
        .unwrap();

    for template in catalog.templates() {
        draft = draft.select_template(&template.id, &catalog);
        let (front, back) = both_sides(&draft, &catalog);
        assert_eq!(front.background, "#123456");
        assert_eq!(front.text_color, template.front_design.text_color);
        assert_eq!(back, template.back_design);
    }
}

#[test]
fn test_preset_then_reset() {
    let catalog = TemplateCatalog::built_in();
    let ocean = ColorPreset::by_name("Ocean").unwrap();
    let draft = CardDraft::initialize(catalog.template("luxury-gold"), None)
        .set_customization(CustomizationKey::NameFontSize, 40u32.into())
        .unwrap()
        .apply_color_preset(&ocean);

    let (front, back) = both_sides(&draft, &catalog);
    assert_eq!(
        (front.background, front.text_color, back.background, back.text_color),
        (
            ocean.front_background.clone(),
            ocean.front_text_color.clone(),
            ocean.back_background.clone(),
            ocean.back_text_color.clone()
        )
    );

    let draft = draft.reset_to_template_defaults(&catalog);
    let gold = catalog.template("luxury-gold").unwrap();
    assert_eq!(
        both_sides(&draft, &catalog),
        (gold.front_design.clone(), gold.back_design.clone())
    );
    let sizes = draft.resolve_font_sizes();
    assert_eq!((sizes.name, sizes.title, sizes.details), (24, 16, 12));
}

#[test]
fn test_update_field_touches_only_that_field() {
    let catalog = TemplateCatalog::built_in();
    let before = CardDraft::initialize(catalog.first(), None)
        .update_field(ContactField::FirstName, "Ada")
        .set_customization(CustomizationKey::BackTextColor, "#222".into())
        .unwrap();
    let after = before.clone().update_field(ContactField::Email, "a@b.com");

    assert_eq!(after.contact.first_name, "Ada");
    assert_eq!(after.contact.email, "a@b.com");
    assert_eq!(after.template_id, before.template_id);
    assert_eq!(after.customization, before.customization);
}

// ============================================================================
// Flatten / restore
// ============================================================================

#[test]
fn test_flatten_keeps_template_design_and_custom_value() {
    let template = t1();
    let draft = CardDraft::initialize(Some(&template), None)
        .set_customization(CustomizationKey::FrontBackground, "#ff0000".into())
        .unwrap();
    let card = flatten(&draft, Some(&template)).unwrap();

    let front = serde_json::to_value(&card.front_data).unwrap();
    assert_eq!(front["design"]["background"], json!("#000"));
    assert_eq!(front["customBackground"], json!("#ff0000"));
    assert_eq!(front["customTextColor"], json!(null));
    assert_eq!(front["fontSize"], json!({"name": 24, "title": 16, "details": 12}));
}

#[test]
fn test_round_trip_resolves_identically() {
    let catalog = TemplateCatalog::built_in();
    let drafts = vec![
        CardDraft::initialize(catalog.template("corporate-blue"), None),
        CardDraft::initialize(catalog.template("tech-innovator"), None)
            .update_field(ContactField::Phone, "+1 555 0100")
            .rename("Work")
            .set_customization(CustomizationKey::BackBackground, "#abcdef".into())
            .unwrap()
            .set_customization(CustomizationKey::TitleFontSize, 20u32.into())
            .unwrap(),
        CardDraft::initialize(catalog.template("elegant-serif"), None)
            .apply_color_preset(&ColorPreset::by_name("Midnight").unwrap()),
    ];

    for draft in drafts {
        let restored = reload(&draft, &catalog);
        assert_eq!(both_sides(&restored, &catalog), both_sides(&draft, &catalog));
        assert_eq!(restored.resolve_font_sizes(), draft.resolve_font_sizes());
        assert_eq!(restored.contact, draft.contact);
        assert_eq!(restored.display_name, draft.display_name);
        assert_eq!(restored.template_id, draft.template_id);
    }
}

#[test]
fn test_reload_keeps_explicit_through_later_switch() {
    let catalog = TemplateCatalog::built_in();
    let draft = CardDraft::initialize(catalog.template("creative-splash"), None)
        .set_customization(CustomizationKey::FrontTextColor, "#0f0f0f".into())
        .unwrap();
    let restored = reload(&draft, &catalog).select_template("bold-gradient", &catalog);

    let front = restored.resolve_design(Side::Front, &catalog);
    let bold = catalog.template("bold-gradient").unwrap();
    assert_eq!(front.text_color, "#0f0f0f");
    assert_eq!(front.background, bold.front_design.background);
}

#[test]
fn test_flatten_without_template_fails() {
    let draft = CardDraft::initialize(None, None);
    assert!(flatten(&draft, None).is_err());
}

#[test]
fn test_legacy_card_without_design_uses_template() {
    let catalog = TemplateCatalog::built_in();
    let stored: PersistedCard = serde_json::from_value(json!({
        "id": "legacy",
        "name": "Old card",
        "template_id": "corporate-blue",
        "front_data": {"firstName": "Grace", "customBackground": "#101010"},
        "back_data": {"email": "grace@example.com"}
    }))
    .unwrap();

    let draft = CardDraft::initialize(catalog.template("corporate-blue"), Some(&stored));
    let blue = catalog.template("corporate-blue").unwrap();
    let (front, back) = both_sides(&draft, &catalog);
    assert_eq!(front.background, "#101010");
    assert_eq!(front.text_color, blue.front_design.text_color);
    assert_eq!(back, blue.back_design);
    assert_eq!(draft.contact.first_name, "Grace");
    assert_eq!(draft.card_id.as_deref(), Some("legacy"));
}

// ============================================================================
// Edits as data
// ============================================================================

#[test]
fn test_edit_script() {
    let catalog = TemplateCatalog::built_in();
    let script = json!([
        {"op": "select_template", "templateId": "modern-minimalist"},
        {"op": "update_field", "field": "firstName", "value": "Ada"},
        {"op": "update_field", "field": "company_name", "value": "Engines Ltd"},
        {"op": "apply_preset", "preset": "Forest"},
        {"op": "set_customization", "key": "detailsFontSize", "value": 14},
        {"op": "rename", "name": "Ada at Engines"}
    ]);
    let edits: Vec<DraftEdit> = serde_json::from_value(script).unwrap();

    let draft = edits
        .into_iter()
        .try_fold(CardDraft::initialize(None, None), |d, e| e.apply(d, &catalog))
        .unwrap();

    let forest = ColorPreset::by_name("Forest").unwrap();
    assert_eq!(draft.contact.company_name, "Engines Ltd");
    assert_eq!(draft.display_name, "Ada at Engines");
    assert_eq!(draft.resolve_design(Side::Front, &catalog).background, forest.front_background);
    assert_eq!(draft.resolve_font_sizes().details, 14);
}
