//! # Cardsmith - Business Card Composition
//!
//! Cardsmith models a two-sided business card being designed from a template.
//! It provides:
//!
//! - **Template catalog**: built-in or fetched templates, category and text filters
//! - **Drafts**: contact fields plus per-attribute design overrides
//! - **Resolution**: override, then template, then literal fallback colors
//! - **Persistence**: flattening to the stored payload shape and back
//! - **Server**: a JSON API hosting editor sessions over the model
//!
//! ## Quick Start
//!
//! ```
//! use cardsmith::{
//!     draft::{CardDraft, ContactField, CustomizationKey, Side},
//!     persist::flatten,
//!     template::{TemplateCatalog, TemplateLookup},
//! };
//!
//! let catalog = TemplateCatalog::built_in();
//! let template = catalog.template("corporate-blue");
//!
//! let draft = CardDraft::initialize(template, None)
//!     .update_field(ContactField::FirstName, "Ada")
//!     .set_customization(CustomizationKey::FrontBackground, "#ff0000".into())?;
//!
//! assert_eq!(draft.resolve_design(Side::Front, &catalog).background, "#ff0000");
//!
//! let card = flatten(&draft, template)?;
//! assert_eq!(card.front_data.design.background.as_deref(), Some("#1e3a8a"));
//! assert_eq!(card.front_data.custom_background.as_deref(), Some("#ff0000"));
//! # Ok::<(), cardsmith::CardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Templates, designs and the catalog |
//! | [`draft`] | The editable card and its overrides |
//! | [`persist`] | Stored card shape and conversion |
//! | [`preview`] | Per-face view model |
//! | [`export`] | Export file naming and sizing |
//! | [`store`] | Template and card storage backends |
//! | [`session`] | Editor sessions |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod draft;
pub mod error;
pub mod export;
pub mod persist;
pub mod preview;
pub mod server;
pub mod session;
pub mod store;
pub mod template;

// Re-exports for convenience
pub use draft::CardDraft;
pub use error::CardError;
pub use template::{Template, TemplateCatalog};
