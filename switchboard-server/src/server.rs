use crate::config::ServerConfig;
use crate::signaling::ws_handler;
use crate::switchboard::{Switchboard, SwitchboardHandle};
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// HTTP surface: the WebSocket upgrade, served at `/` and `/ws`.
pub fn app(switchboard: SwitchboardHandle) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(switchboard)
}

/// Binds the listener, starts the switchboard and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr().context("Listener has no local address")?;

    let switchboard = Switchboard::spawn(config.command_buffer);

    info!("Signaling server running at http://{}", local);
    info!("WebSocket endpoint available at ws://{}/?role=<producer|consumer>", local);

    axum::serve(listener, app(switchboard))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
