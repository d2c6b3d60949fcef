use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sentirec_api::api::{create_router, AppState};
use sentirec_api::config::Config;
use sentirec_api::services::RemoteOracle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let oracle = Arc::new(RemoteOracle::new(config.oracle_url.clone()));
    let state = AppState::new(oracle);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, oracle_url = %config.oracle_url, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
