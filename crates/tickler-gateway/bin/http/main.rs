mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tickler_core::ItemManager;
use tickler_gateway::{App, AppState};
use tickler_service::ItemService;
use tickler_storage::{InMemoryRepository, MySqlRepository};
use tickler_telemetry::TelemetrySettings;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    let _telemetry = tickler_telemetry::init(
        TelemetrySettings::builder()
            .service_name("tickler-gateway")
            .log_format(config.log_format.into())
            .otlp_endpoint(config.otlp_endpoint.clone())
            .build(),
    )?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting tickler gateway"
    );

    let items: Arc<dyn ItemManager> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(ItemService::new(InMemoryRepository::new())),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository =
                MySqlRepository::connect(mysql_dsn, config.mysql_max_connections).await?;
            repository.migrate().await?;
            Arc::new(ItemService::new(repository))
        }
    };

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(AppState::new(items)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
