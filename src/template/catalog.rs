//! Template catalog: built-in templates, lookup and filtering.

use serde::Deserialize;

use super::{Design, Template, TemplateLookup};

/// Category label that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// An ordered set of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

/// Catalog query, as sent by the template browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateFilter {
    /// Category name, or "All" / absent for every category.
    #[serde(default)]
    pub category: Option<String>,
    /// Case-insensitive substring matched against name, description and category.
    #[serde(default, rename = "q")]
    pub query: Option<String>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The templates shipped with cardsmith.
    pub fn built_in() -> Self {
        Self::new(vec![
            template(
                "modern-minimalist",
                "Modern Minimalist",
                "Clean lines and plenty of white space",
                "Professional",
                false,
                Design::new("#ffffff", "#111111", "left"),
                Design::new("#f4f4f5", "#27272a", "right"),
            ),
            template(
                "creative-splash",
                "Creative Splash",
                "Playful color for designers and makers",
                "Creative",
                false,
                Design::new("linear-gradient(135deg, #f97316, #ec4899)", "#ffffff", "centered"),
                Design::new("#fff7ed", "#9a3412", "left"),
            ),
            template(
                "corporate-blue",
                "Corporate Blue",
                "A dependable navy card for business settings",
                "Professional",
                false,
                Design::new("#1e3a8a", "#ffffff", "left"),
                Design::new("#eff6ff", "#1e3a8a", "right"),
            ),
            template(
                "tech-innovator",
                "Tech Innovator",
                "Dark background with a terminal-green accent",
                "Technology",
                false,
                Design::new("#0f172a", "#22c55e", "left"),
                Design::new("#1e293b", "#e2e8f0", "left"),
            ),
            template(
                "elegant-serif",
                "Elegant Serif",
                "Quiet cream stock with classic typography",
                "Professional",
                true,
                Design::new("#fdf8f0", "#3f2d20", "centered"),
                Design::new("#3f2d20", "#fdf8f0", "centered"),
            ),
            template(
                "bold-gradient",
                "Bold Gradient",
                "Full-bleed gradient that stands out in a stack",
                "Creative",
                true,
                Design::new("linear-gradient(90deg, #6366f1, #a855f7)", "#ffffff", "centered"),
                Design::new("linear-gradient(90deg, #a855f7, #6366f1)", "#ffffff", "centered"),
            ),
            template(
                "luxury-gold",
                "Luxury Gold",
                "Black and gold for premium brands",
                "Luxury",
                true,
                Design::new("#0a0a0a", "#d4af37", "centered"),
                Design::new("#d4af37", "#0a0a0a", "centered"),
            ),
            template(
                "artistic-portfolio",
                "Artistic Portfolio",
                "Soft pastel wash for illustrators and photographers",
                "Creative",
                true,
                Design::new("linear-gradient(160deg, #fde68a, #fbcfe8)", "#3b0764", "left"),
                Design::new("#fdf4ff", "#3b0764", "left"),
            ),
        ])
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// First template, used when nothing has been selected yet.
    pub fn first(&self) -> Option<&Template> {
        self.templates.first()
    }

    /// Distinct categories in catalog order, preceded by "All".
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for category in self.templates.iter().filter_map(|t| t.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

    /// Templates matching `filter`, in catalog order.
    pub fn filter(&self, filter: &TemplateFilter) -> Vec<&Template> {
        let category = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));
        let query = filter
            .query
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        self.templates
            .iter()
            .filter(|t| match category {
                Some(c) => t
                    .category
                    .as_deref()
                    .is_some_and(|tc| tc.eq_ignore_ascii_case(c)),
                None => true,
            })
            .filter(|t| match &query {
                Some(q) => [Some(t.name.as_str()), t.description.as_deref(), t.category.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(q.as_str())),
                None => true,
            })
            .collect()
    }
}

impl TemplateLookup for TemplateCatalog {
    fn template(&self, id: &str) -> Option<&Template> {
        self.templates.template(id)
    }
}

impl From<Vec<Template>> for TemplateCatalog {
    fn from(templates: Vec<Template>) -> Self {
        Self::new(templates)
    }
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    premium: bool,
    front_design: Design,
    back_design: Design,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        premium,
        front_design,
        back_design,
    }
}
