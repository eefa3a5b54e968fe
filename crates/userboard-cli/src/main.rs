//! CLI entry point for userboard.
//!
//! This binary provides the `userboard` command with subcommands for
//! starting the HTTP server and checking a running instance.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use userboard_store::UserStore;
use userboard_web::WebServer;

mod config;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Userboard — in-memory user registry with a browser UI.
#[derive(Parser)]
#[command(
    name = "userboard",
    version,
    about = "Userboard — user registry with a browser UI",
    long_about = "A small HTTP service that manages an in-memory collection of user \
                  records and renders HTML fragments for partial-page updates."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve,

    /// Query a running instance for its status.
    Status,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => cmd_serve().await,
        Commands::Status => cmd_status().await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve() -> Result<()> {
    init_tracing("info");

    info!("starting userboard");

    let config = config::load_web_config();
    info!(addr = %config.bind_addr, port = config.port, "configuration loaded");

    // The registry lives for the process; it is empty on every start.
    let users = UserStore::new();

    let server = WebServer::new(config, users);
    let addr = server.addr();
    info!(addr = %addr, "user registry ready, serving");

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("web server exited with an error")
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

async fn cmd_status() -> Result<()> {
    init_tracing("warn");

    let config = config::load_web_config();
    let url = format!("http://{}:{}/api/status", config.bind_addr, config.port);

    let response = reqwest::get(&url)
        .await
        .with_context(|| format!("failed to reach {url}"))?;
    let status: serde_json::Value = response
        .json()
        .await
        .context("status response was not valid JSON")?;

    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
