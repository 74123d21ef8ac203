mod app;
mod dealer;
mod domain;
mod infrastructure;
mod models;
mod shared;
mod view;
mod web_socket;

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::HttpDeckApi;
use crate::shared::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let api = Arc::new(HttpDeckApi::new(&config)?);

    let app = app::create_routes(api);

    tracing::info!(addr = %config.listen_addr, api = %config.api_base_url, "starting server");

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("received shutdown signal");
}
