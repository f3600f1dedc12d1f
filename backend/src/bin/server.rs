//! Agenda HTTP Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory repository, agendas uploaded via POST /v1/agendas
//! cargo run --bin agenda-server
//!
//! # Seed from a JSON file or directory
//! AGENDA_PATH=data/ LIVE_POLICY=date_rollover cargo run --bin agenda-server
//! ```
//!
//! Configuration is read from `agenda.toml` when present; see
//! [`agenda_live::config`] for the environment overrides.
//! `RUST_LOG` sets the log level (default: info).

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use agenda_live::config::AppConfig;
use agenda_live::db::RepositoryFactory;
use agenda_live::http::{create_router, AppState};
use agenda_live::services::AgendaService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting agenda server");

    let config = AppConfig::load()?;
    info!(
        repository = %config.repository.repo_type,
        policy = %config.annotator.policy,
        strict_times = config.annotator.strict_times,
        timezone = ?config.annotator.timezone,
        utc_offset_minutes = ?config.annotator.utc_offset_minutes,
        "Configuration loaded"
    );

    let repository = RepositoryFactory::from_settings(&config.repository)?;
    let service = AgendaService::new(
        repository,
        config.annotator.annotator(),
        Arc::new(config.annotator.clock()?),
    );

    let app = create_router(AppState::new(service));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
