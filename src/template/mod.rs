//! # Templates
//!
//! A template is a named pair of [`Design`]s, one per card face. Templates
//! are read-only to the editor: drafts copy values out of them and stored
//! cards snapshot the design they were saved with.
//!
//! ## Example
//!
//! ```
//! use cardsmith::template::{TemplateCatalog, TemplateLookup};
//!
//! let catalog = TemplateCatalog::built_in();
//! let t = catalog.template("corporate-blue").unwrap();
//! assert_eq!(t.category.as_deref(), Some("Professional"));
//! ```

mod catalog;

pub use catalog::{TemplateCatalog, TemplateFilter};

use serde::{Deserialize, Serialize};

use crate::persist::lenient;

/// Background/text-color/layout triple describing one face of a card.
///
/// `background` is a CSS color or gradient expression, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default, deserialize_with = "lenient::string")]
    pub background: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text_color: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub layout: String,
}

impl Design {
    pub fn new(background: &str, text_color: &str, layout: &str) -> Self {
        Self {
            background: background.to_string(),
            text_color: text_color.to_string(),
            layout: layout.to_string(),
        }
    }
}

/// A card template from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub premium: bool,
    #[serde(default, deserialize_with = "lenient::design")]
    pub front_design: Design,
    #[serde(default, deserialize_with = "lenient::design")]
    pub back_design: Design,
}

/// Resolve a template id to a template.
///
/// Implemented by the catalog and by plain slices so that callers holding a
/// fetched `Vec<Template>` don't need to build a catalog first.
pub trait TemplateLookup {
    fn template(&self, id: &str) -> Option<&Template>;
}

impl TemplateLookup for [Template] {
    fn template(&self, id: &str) -> Option<&Template> {
        self.iter().find(|t| t.id == id)
    }
}

impl TemplateLookup for Vec<Template> {
    fn template(&self, id: &str) -> Option<&Template> {
        self.as_slice().template(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_json_keys() {
        let design = Design::new("#000", "#fff", "centered");
        let json = serde_json::to_value(&design).unwrap();
        assert_eq!(json["textColor"], "#fff");
        assert!(json.get("text_color").is_none());
    }

    #[test]
    fn test_template_from_backend_row() {
        let json = r##"{
            "id": "t1",
            "name": "Mono",
            "description": null,
            "category": "Professional",
            "premium": false,
            "front_design": {"background": "#000", "textColor": "#fff", "layout": "x"},
            "back_design": {"background": "#fff", "textColor": "#000", "layout": "y"}
        }"##;
        let t: Template = serde_json::from_str(json).unwrap();
        assert_eq!(t.front_design, Design::new("#000", "#fff", "x"));
        assert_eq!(t.back_design.layout, "y");
        assert_eq!(t.description, None);
    }

    #[test]
    fn test_template_with_broken_design() {
        // Missing back design, wrong-typed front color
        let json = r##"{"id": "t2", "front_design": {"background": 5, "textColor": "#111"}}"##;
        let t: Template = serde_json::from_str(json).unwrap();
        assert_eq!(t.front_design.background, "");
        assert_eq!(t.front_design.text_color, "#111");
        assert_eq!(t.back_design, Design::default());
        assert!(!t.premium);
    }

    #[test]
    fn test_slice_lookup() {
        let templates = vec![Template {
            id: "a".into(),
            name: "A".into(),
            description: None,
            category: None,
            premium: false,
            front_design: Design::default(),
            back_design: Design::default(),
        }];
        assert!(templates.template("a").is_some());
        assert!(templates.template("b").is_none());
    }
}
