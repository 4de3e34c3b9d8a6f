//! Mini Club server binary.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use miniclub::adapters::http::{api_router, ClubAppState, ClubRules};
use miniclub::adapters::{DevTokenResolver, InMemoryLedgerStore, StoreTokenLedger, SystemClock};
use miniclub::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let rules = ClubRules::from_config(&config.club)?;
    let state = ClubAppState::new(
        Arc::new(InMemoryLedgerStore::new()),
        Arc::new(StoreTokenLedger::new()),
        Arc::new(SystemClock),
        rules,
    );
    let app = api_router(
        state,
        Arc::new(DevTokenResolver::new()),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        bootstrap_owner = ?config.club.owner_bootstrap_id,
        "mini club listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
