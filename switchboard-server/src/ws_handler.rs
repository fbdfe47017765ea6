//! UI-facing WebSocket route. Every socket becomes one worker port: events
//! drain out of an unbounded channel onto the socket, inbound text frames
//! decode to topic envelopes, and a dropped socket is reported as a port
//! close.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use switchboard_core::{PortEvent, PortId, WorkerMessage};
use switchboard_worker::WorkerCommand;

use crate::AppState;

pub async fn ui_ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let port_id = PortId::new();
    info!("New UI port connected: {}", port_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<PortEvent>();

    if state
        .commands
        .send(WorkerCommand::PortOpened { id: port_id, tx })
        .await
        .is_err()
    {
        error!("Worker is gone, refusing port {}", port_id);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!("Failed to serialize port event: {}", e),
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let commands = state.commands.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<WorkerMessage>(&text) {
                        Ok(message) => {
                            let cmd = WorkerCommand::Message {
                                id: port_id,
                                message,
                            };
                            if commands.send(cmd).await.is_err() {
                                error!("Worker died");
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid envelope from {}: {:?}", port_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            let _ = commands
                .send(WorkerCommand::PortClosed { id: port_id })
                .await;
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    info!("UI port disconnected: {}", port_id);
}
