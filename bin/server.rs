// Pokedex - Web Server
// Serves the read-only JSON surface over the built-in catalog

use anyhow::{Context, Result};
use clap::Parser;
use pokedex::{config::AppConfig, logging, Catalog};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "pokedex-server")]
#[command(about = "Read-only JSON API over the pokedex catalog")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pokedex.toml", env = "POKEDEX_CONFIG")]
    config: PathBuf,

    /// Bind address (overrides config file)
    #[arg(long, env = "POKEDEX_BIND")]
    bind: Option<String>,
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    logging::init(&config.log, logging::LogTarget::Stderr)?;

    let catalog = Catalog::load(config.load_options()).context("Catalog validation failed")?;
    let app = pokedex::api::router(Arc::new(catalog));

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;

    info!(addr = %config.server.bind, "server listening");
    println!("🚀 Server running on http://{}", config.server.bind);
    println!("   API: http://{}/api/pokemon", config.server.bind);
    println!("   Press Ctrl+C to stop");

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
