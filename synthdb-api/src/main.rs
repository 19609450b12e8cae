//! synthdb-api - synthesizer catalog and submission service
//!
//! Serves the public catalog read API, accepts visitor suggestions,
//! runs the administrative acceptance workflow, and issues API keys.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use synthdb_api::services::mailer::Mailer;
use synthdb_api::{build_router, AppState};
use synthdb_common::config::{Overrides, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "synthdb-api", version, about = "Synthesizer catalog and submission service")]
struct Args {
    /// Bind host (overrides SYNTHDB_HOST and config file)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides SYNTHDB_PORT and config file)
    #[arg(long)]
    port: Option<u16>,

    /// Database file path (overrides SYNTHDB_DATABASE and config file)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Config file path (default: platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting synthdb-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = ServiceConfig::resolve(&Overrides {
        host: args.host,
        port: args.port,
        database: args.database,
        config_file: args.config,
    });

    info!("Database: {}", config.database_path.display());
    let pool = synthdb_common::db::init_database(&config.database_path).await?;

    let mailer = Arc::new(Mailer::new(
        config.mail_endpoint.clone(),
        config.mail_from.clone(),
    ));

    let state = AppState::new(pool, mailer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("synthdb-api listening on http://{}", config.bind_address());
    info!("Health check: http://{}/health", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
