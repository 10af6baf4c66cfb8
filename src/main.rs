//! # Cardsmith CLI
//!
//! Command-line interface for the business card editor.
//!
//! ## Usage
//!
//! ```bash
//! # Run the editor API with cards kept in a JSON file
//! cardsmith serve --data cards.json
//!
//! # Run against a hosted backend
//! CARDSMITH_API_KEY=... cardsmith serve --backend-url https://db.example.com
//!
//! # Browse templates and presets
//! cardsmith templates --category Professional
//! cardsmith presets
//!
//! # Compose a card and print the stored payload
//! cardsmith new --template corporate-blue --set first_name=Ada --color frontBackground=#ff0000
//! ```

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use cardsmith::{
    CardDraft, CardError, TemplateCatalog,
    draft::{ColorPreset, ContactField, CustomizationKey, Side},
    persist::to_persisted_card,
    server::{self, BackendConfig, ServerConfig},
    store::{CardStore, HostedConfig, LocalStore, save_card},
    template::{TemplateFilter, TemplateLookup},
};

/// Cardsmith - business card composer
#[derive(Parser, Debug)]
#[command(name = "cardsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the editor HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        listen: String,

        /// JSON file for saved cards (local backend)
        #[arg(long, value_name = "FILE", conflicts_with = "backend_url")]
        data: Option<PathBuf>,

        /// Hosted backend base URL
        #[arg(long, env = "CARDSMITH_BACKEND_URL", requires = "api_key")]
        backend_url: Option<String>,

        /// Hosted backend API key
        #[arg(long, env = "CARDSMITH_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Signed-in user's access token for the hosted backend
        #[arg(long, env = "CARDSMITH_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,

        /// User id written on new cards and used to filter the card list
        #[arg(long, env = "CARDSMITH_USER_ID")]
        user_id: Option<String>,
    },

    /// List built-in templates
    Templates {
        /// Only this category ("All" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search on name and description
        #[arg(long)]
        search: Option<String>,
    },

    /// List built-in color presets
    Presets,

    /// List cards saved in a local data file
    Cards {
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },

    /// Compose a card from a template and print its stored form
    New {
        /// Template id
        #[arg(long)]
        template: String,

        /// Card display name
        #[arg(long)]
        name: Option<String>,

        /// Contact field, as FIELD=VALUE (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        fields: Vec<String>,

        /// Customization, as KEY=VALUE (repeatable)
        #[arg(long = "color", value_name = "KEY=VALUE")]
        customizations: Vec<String>,

        /// Color preset name, applied before --color values
        #[arg(long)]
        preset: Option<String>,

        /// Save into this local data file instead of only printing
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CardError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            data,
            backend_url,
            api_key,
            access_token,
            user_id,
        } => {
            let backend = match (backend_url, api_key) {
                (Some(base_url), Some(api_key)) => BackendConfig::Hosted(HostedConfig {
                    base_url,
                    api_key,
                    access_token,
                    owner_id: user_id,
                }),
                _ => BackendConfig::Local { data_path: data },
            };
            server::serve(ServerConfig {
                listen_addr: listen,
                backend,
            })
            .await
        }

        Commands::Templates { category, search } => {
            let catalog = TemplateCatalog::built_in();
            let filter = TemplateFilter {
                category,
                query: search,
            };
            for t in catalog.filter(&filter) {
                println!(
                    "{:<20} {:<20} {:<13} {}{}",
                    t.id,
                    t.name,
                    t.category.as_deref().unwrap_or("-"),
                    t.front_design.background,
                    if t.premium { "  [premium]" } else { "" }
                );
            }
            Ok(())
        }

        Commands::Presets => {
            for p in ColorPreset::built_in() {
                println!(
                    "{:<12} front {} on {}  back {} on {}",
                    p.name,
                    p.front_text_color,
                    p.front_background,
                    p.back_text_color,
                    p.back_background
                );
            }
            Ok(())
        }

        Commands::Cards { data } => {
            let store = LocalStore::open(&data).await?;
            for card in store.list_cards().await? {
                println!(
                    "{:<36}  {:<24} {}",
                    card.id.as_deref().unwrap_or("-"),
                    card.name,
                    card.template_id.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }

        Commands::New {
            template,
            name,
            fields,
            customizations,
            preset,
            data,
        } => {
            let catalog = TemplateCatalog::built_in();
            let selected = catalog
                .template(&template)
                .ok_or_else(|| CardError::UnknownTemplate(template.clone()))?;

            let mut draft = CardDraft::initialize(Some(selected), None);
            if let Some(name) = name {
                draft = draft.rename(name);
            }
            for pair in &fields {
                let (field, value) = split_pair(pair)?;
                draft = draft.update_field(field.parse::<ContactField>()?, value);
            }
            if let Some(preset) = preset {
                draft = draft.apply_color_preset(&ColorPreset::by_name(&preset)?);
            }
            for pair in &customizations {
                let (key, value) = split_pair(pair)?;
                let key: CustomizationKey = key.parse()?;
                draft = draft.set_customization(key, value.into())?;
            }

            let front = draft.resolve_design(Side::Front, &catalog);
            let back = draft.resolve_design(Side::Back, &catalog);
            log::info!(
                "Front {} on {}, back {} on {}",
                front.text_color,
                front.background,
                back.text_color,
                back.background
            );

            let mut card = to_persisted_card(&draft, Some(selected))?;
            if let Some(path) = data {
                let store = LocalStore::open(&path).await?;
                card = save_card(&store, card).await?;
                log::info!("Saved to {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&card)?);
            Ok(())
        }
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str), CardError> {
    pair.split_once('=')
        .ok_or_else(|| CardError::InvalidField(format!("expected KEY=VALUE, got '{}'", pair)))
}
