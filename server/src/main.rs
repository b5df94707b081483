use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trail_booking::backend::config::AppConfig;
use trail_booking::backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides; `log` records from the backend are bridged in
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    match config.fixed_today {
        Some(today) => info!("Calendar pinned to {}", today),
        None => info!("Calendar follows the local date"),
    }

    let app_state = initialize_backend(&config).await;
    let app = create_router(app_state, config.cors_origin.clone());

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on {}", config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}
