//! PulseTrack Server
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! A `.env` file in the working directory is loaded first. Settings come from
//! `--config <file>` or the default locations, with environment overrides:
//! - `PULSETRACK_HOST` / `PULSETRACK_PORT`: bind address (default 0.0.0.0:5000)
//! - `PULSETRACK_DB_PATH`: SQLite database file
//! - `PULSETRACK_LOG_LEVEL` / `PULSETRACK_LOG_FORMAT`: logging
//! - `TWITTER_BEARER_TOKEN_1` .. `TWITTER_BEARER_TOKEN_9`: bearer tokens
//! - `RUST_LOG`: overrides the log filter entirely

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsetrack::api::{serve, AppState};
use pulsetrack::config::{generate_default_config, Config, LoggingConfig};
use pulsetrack::storage::TweetStore;
use pulsetrack::twitter::{KeyRing, TwitterClient};

#[derive(Parser)]
#[command(name = "pulsetrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Real-time tweet sentiment service")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API and WebSocket server (default)
    Serve,

    /// Print a default config file
    InitConfig {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::InitConfig { output } => init_config(output.as_deref()),
        Commands::Serve => {
            // Missing .env is fine
            let _ = dotenvy::dotenv();
            let config = load_config(cli.config.as_deref())?;
            init_tracing(&config.logging);
            run(config).await
        }
    }
}

fn init_config(output: Option<&Path>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_with_env(path).context("Failed to load configuration"),
        None => Ok(Config::load_default()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pulsetrack={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting PulseTrack server v{}", env!("CARGO_PKG_VERSION"));

    let keys = KeyRing::new(config.twitter.bearer_tokens.clone())?;
    tracing::info!(total_api_keys = keys.len(), "Loaded Twitter bearer tokens");

    let source = TwitterClient::new(&config.twitter).context("Failed to build Twitter client")?;

    let store = TweetStore::open(Path::new(&config.storage.db_path))
        .with_context(|| format!("Failed to open database {}", config.storage.db_path))?;
    if let Some(path) = store.path() {
        tracing::info!(path = %path.display(), "Database opened");
    }

    let state = AppState::new(config, store, Arc::new(source), keys);
    serve(state).await?;

    Ok(())
}
