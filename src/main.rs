use std::net::SocketAddr;

use fmp_relay::FinancialModelingPrep;
use fmp_relay::config::Config;
use fmp_relay::server::{self, AppState};
use fmp_relay::tracing_init::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);
    tracing::info!(service = "fmp-relay", symbol = %config.symbol, "starting");

    if config.api_key.is_none() {
        tracing::warn!("FMP_API_KEY is not set; every /data request will fail");
    }

    let client = FinancialModelingPrep::from_config(&config);
    let app = server::router(AppState::new(client, config.symbol.clone()));

    let addr: SocketAddr = config.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
