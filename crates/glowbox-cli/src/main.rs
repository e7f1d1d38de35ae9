use clap::{Parser, Subcommand};
use glowbox_core::ScrapeRules;
use glowbox_scraper::ProductScraper;

#[derive(Debug, Parser)]
#[command(name = "glowbox-cli")]
#[command(about = "Glowbox catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract product metadata from a retailer product page URL.
    Scrape {
        /// Product page URL (absolute http/https).
        url: String,
        /// Pretty-print the resulting JSON.
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { url, pretty } => scrape(&url, pretty).await,
    }
}

async fn scrape(url: &str, pretty: bool) -> anyhow::Result<()> {
    let config = glowbox_core::load_app_config()?;
    let rules = match &config.rules_path {
        Some(path) => ScrapeRules::load(path)?,
        None => ScrapeRules::builtin(),
    };

    let scraper = ProductScraper::new(&config, rules)?;
    match scraper.scrape(url).await {
        Ok(product) => {
            let json = if pretty {
                serde_json::to_string_pretty(&product)?
            } else {
                serde_json::to_string(&product)?
            };
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, url, "scrape failed");
            anyhow::bail!(err.user_message())
        }
    }
}
