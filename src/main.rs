mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod http;
mod product_actor;
mod store;

#[cfg(test)]
mod mock_framework;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::app_system::{setup_tracing, Config, ProductSystem};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Config::parse();
    let seed = config.load_seed()?;
    info!(products = seed.len(), "Starting product catalogue");

    let system = ProductSystem::new(config.buffer_size, seed)?;

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(bind_address = %address, "Server is running");

    axum::serve(listener, http::router(system.product_client.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
