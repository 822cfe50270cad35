//! ComplyBot service
//!
//! Main entry point for the compliance question-answering microservice.
//! Loads the dataset, constructs the gateway client, and serves the HTTP
//! API.

mod routes;
mod service;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use comply_core::{config::AppConfig, logging, AppResult};
use comply_knowledge::ComplianceStore;
use comply_llm::{create_client, ModelSettings};

use crate::service::AnswerService;
use crate::state::AppState;

/// ComplyBot - compliance question answering over a static knowledge base
#[derive(Parser, Debug)]
#[command(name = "complybot")]
#[command(about = "Compliance question-answering microservice", long_about = None)]
#[command(version)]
struct Cli {
    /// Bind port for the HTTP server
    #[arg(short, long, env = "COMPLY_PORT")]
    port: Option<u16>,

    /// Path to the compliance dataset JSON file
    #[arg(short, long, env = "COMPLY_DATA")]
    data: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, env = "COMPLY_CONFIG")]
    config: Option<PathBuf>,

    /// Gateway provider (openai, custom)
    #[arg(long, env = "COMPLY_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, env = "COMPLY_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment and config file
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.port,
        cli.data,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("ComplyBot service starting");
    tracing::debug!("Dataset: {:?}", config.data_path);
    tracing::debug!("Provider: {}", config.llm.provider);
    tracing::debug!("Model: {}", config.llm.model);

    config.validate()?;

    // Load the compliance dataset; a failed load degrades, never aborts
    let store = Arc::new(ComplianceStore::load(&config.data_path));
    if !store.is_loaded() {
        tracing::error!("Failed to load compliance data. Service may not function properly.");
    }

    // Construct the gateway client once and pass it by handle
    let settings = ModelSettings::from(&config.llm);
    let api_key = config.resolve_api_key();
    let client = create_client(
        &config.llm.provider,
        config.llm.endpoint.as_deref(),
        api_key.as_deref(),
        settings,
    )?;

    // Startup reachability probe; informational only
    if client.probe().await {
        tracing::info!("gateway connection verified successfully");
    } else {
        tracing::warn!("gateway connection test failed");
    }

    let service = AnswerService::new(Arc::clone(&store), Arc::clone(&client));

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState {
        config,
        store,
        client,
        service,
        start_time: Instant::now(),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, routes::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolve when the process receives a shutdown signal.
///
/// In-flight requests may be abandoned; answering a question is safe to
/// repeat.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install shutdown signal handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
