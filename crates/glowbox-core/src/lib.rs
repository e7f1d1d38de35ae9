//! Shared types and configuration for the Glowbox catalog.
//!
//! Holds the fixed category/store taxonomies, the scraped-product data
//! model, the extraction rule tables loaded from `config/scrape_rules.yaml`,
//! and environment-based application configuration.

pub mod app_config;
pub mod config;
pub mod rules;
pub mod scraped;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use rules::ScrapeRules;
pub use scraped::ScrapedProduct;
pub use taxonomy::{Category, Store};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
