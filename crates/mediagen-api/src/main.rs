mod error;
mod routes;
mod schemas;
mod state;

use crate::routes::api_routes;
use crate::state::AppState;
use mediagen_core::MediagenConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = MediagenConfig::load()?;
    if config.api_token().is_none() {
        tracing::warn!("no API token configured; generation requests will fail");
    }

    let state = Arc::new(AppState::new(config));
    let app = api_routes().with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("starting media service on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
