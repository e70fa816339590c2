//! Prompt-to-Excalidraw relay
//!
//! This application accepts a natural-language prompt over HTTP, asks the
//! Anthropic Messages API to answer through a diagram tool, and returns the
//! resulting Excalidraw elements.

mod api;
mod conversion;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::client::ClientManager;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::relay::PromptRelay;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    if let Err(e) = run().await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Arc::new(Config::from_env().context("Configuration error")?);

    init_logging(&config.log_level);

    print_startup_banner(&config);

    // Credentials are resolved on the first relay request, not here.
    let clients = Arc::new(ClientManager::from_env(config.clone()));
    let relay = Arc::new(PromptRelay::new(&config, clients));

    let app = create_router(AppState {
        config: config.clone(),
        relay,
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Excalidraw Relay v{}", env!("CARGO_PKG_VERSION"));
    println!("✅ Configuration loaded successfully");
    println!("   Anthropic API: {}", config.base_url);
    println!("   Candidate models: {}", config.candidates.join(", "));
    println!("   Max Tokens: {}", config.max_tokens);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Excalidraw Relay v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: excalidraw-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  ANTHROPIC_API_KEY - Anthropic API key (read on first request)");
    println!("  CLAUDE_API_KEY    - Fallback when ANTHROPIC_API_KEY is unset");
    println!("  CONFIG_PATH       - TOML config file (default: config.toml, optional)");
    println!("  RUST_LOG          - Overrides server.log_level");
    println!();
    println!("Endpoints:");
    println!("  POST /api/chat  {{\"prompt\": \"...\"}} -> {{\"elements\": [...]}}");
    println!("  GET  /health");
}
