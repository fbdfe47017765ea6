use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::mpsc;
use tracing::{Level, info};

use switchboard_worker::{Worker, WorkerCommand};

mod spa_bridge;
mod ws_handler;

use spa_bridge::BridgeConnector;

/// Shared handles for the axum routes: the worker's command channel and the
/// registry of attached signaling backends.
#[derive(Clone)]
pub struct AppState {
    pub commands: mpsc::Sender<WorkerCommand>,
    pub bridge: BridgeConnector,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Initializing Switchboard...");

    let (command_tx, command_rx) = mpsc::channel(100);
    let bridge = BridgeConnector::new();

    let worker = Worker::new(Arc::new(bridge.clone()), command_rx);
    tokio::spawn(worker.run());

    let state = AppState {
        commands: command_tx,
        bridge,
    };

    let app = Router::new()
        .route("/ws", get(ws_handler::ui_ws_handler))
        .route("/spa/{src}", get(spa_bridge::spa_ws_handler))
        .with_state(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Switchboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
