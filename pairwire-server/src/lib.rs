//! Rendezvous server: pairs two sockets in a named room and relays their
//! offer, answer and ICE candidates to each other.

mod config;
mod room;
mod signaling;

pub use config::ServerConfig;
pub use room::*;
pub use signaling::*;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use pairwire_core::utils::SIGNALING_PATH;
use tokio::net::TcpListener;
use tracing::info;

pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route(SIGNALING_PATH, get(ws_handler))
        .with_state(service)
}

/// Binds `config.addr` and serves until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    serve_on(listener).await
}

/// Serves on an already bound listener.
pub async fn serve_on(listener: TcpListener) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let service = SignalingService::new(RoomManager::new());

    info!("Signaling server listening on ws://{}{}", addr, SIGNALING_PATH);
    axum::serve(listener, router(service))
        .await
        .context("Signaling server stopped")
}
