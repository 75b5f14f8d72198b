//! Webring CLI
//!
//! Runs the webring API server and inspects the backing spreadsheet.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webring_api::{ApiConfig, ApiServer, AppState};
use webring_core::traits::DataSource;
use webring_core::types::{urls_from_rows, RangeSelector};
use webring_source::{FixedSource, SheetsSource};

/// Lemonade Stand Anarchy WebRing
#[derive(Parser)]
#[command(name = "webring")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Directory served under /pictures
        #[arg(long, env = "PICTURES_DIR")]
        pictures: Option<PathBuf>,
        /// Serve a built-in demo ring instead of reading the spreadsheet
        #[arg(long)]
        mock: bool,
    },

    /// Fetch the ring from the spreadsheet once and print it
    Fetch {
        /// Range to read, overriding SHEET_RANGE
        #[arg(short, long)]
        range: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "webring=debug,info"
    } else {
        "webring=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(cli.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!cli.log_json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    match cli.command {
        Commands::Serve { port, bind, pictures, mock } => cmd_serve(port, &bind, pictures, mock).await,
        Commands::Fetch { range } => cmd_fetch(range.as_deref()).await,
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str, pictures: Option<PathBuf>, mock: bool) -> Result<()> {
    println!("{}", "🍋 Starting WebRing API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);

    let mut config = ApiConfig::from_env();
    config.port = port;
    if let Some(dir) = pictures {
        config.pictures_dir = dir;
    }

    let state = if mock {
        println!("   {} built-in demo ring", "Source:".yellow());
        AppState::with_source(config, Arc::new(FixedSource::demo()))
    } else {
        println!("   {} {}", "Source:".dimmed(), config.sheet_range);
        AppState::new(config).context("Failed to set up the spreadsheet source")?
    };
    println!("\n   Press Ctrl+C to stop.\n");

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;
    ApiServer::with_state(state).run(addr).await?;

    Ok(())
}

/// Fetch the ring once
async fn cmd_fetch(range: Option<&str>) -> Result<()> {
    let config = ApiConfig::from_env();
    let range: RangeSelector = match range {
        Some(raw) => raw.parse().context("Invalid --range")?,
        None => config.sheet_range.clone(),
    };

    println!("{} {}", "📄 Fetching:".cyan().bold(), range);

    let source = SheetsSource::with_config(config.sheets_config())?;
    let rows = source
        .fetch_range(&range)
        .await
        .context("Failed to fetch from Google Sheets")?;
    let row_count = rows.len();
    let urls = urls_from_rows(rows);
    info!(rows = row_count, urls = urls.len(), "Fetched spreadsheet range");

    if urls.is_empty() {
        println!("\n{}", "No webring URLs found.".yellow());
        return Ok(());
    }

    println!("\n{} {}", "✅ Webring members:".green().bold(), urls.len());
    for (i, url) in urls.iter().enumerate() {
        println!("   {:>3}. {}", i + 1, url);
    }
    if row_count > urls.len() {
        println!("\n   {} {} blank rows skipped", "Note:".dimmed(), row_count - urls.len());
    }

    Ok(())
}
