//! Backend attach route and the production `SpaConnector`.
//!
//! An external signaling backend attaches by opening a WebSocket at
//! `/spa/{src}`. Enabling an SPA whose spec names that `src` yields an
//! adapter that serializes requests onto the attached socket and pumps the
//! socket's decoded events back into the worker. Enabling a `src` with no
//! backend attached surfaces as an SPA error event, never as a failure of
//! the enable call itself.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use switchboard_core::{Answer, Hangup, IceCandidate, Offer, SpaEvent, SpaRequest, SpaSpec};
use switchboard_worker::{SpaAdapter, SpaConnector};

use crate::AppState;

/// Close code reported when an attached backend drops without a close frame.
const CLOSE_ABNORMAL: u16 = 1006;

#[derive(Clone, Default)]
pub struct BridgeConnector {
    /// Request channels of attached backends, keyed by src.
    attached: Arc<DashMap<String, mpsc::UnboundedSender<SpaRequest>>>,
    /// Event channel of the adapter currently enabled for each src.
    events: Arc<DashMap<String, mpsc::Sender<SpaEvent>>>,
}

impl BridgeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn attach(&self, src: &str, tx: mpsc::UnboundedSender<SpaRequest>) {
        if self.attached.insert(src.to_owned(), tx).is_some() {
            warn!(%src, "replaced an already-attached backend");
        }
    }

    fn detach(&self, src: &str) {
        self.attached.remove(src);
    }

    /// Forward a backend event to whichever adapter is enabled for `src`.
    async fn deliver(&self, src: &str, event: SpaEvent) {
        let Some(events) = self.events.get(src).map(|entry| entry.value().clone()) else {
            return;
        };
        let _ = events.send(event).await;
    }
}

impl SpaConnector for BridgeConnector {
    fn create(&self, spec: &SpaSpec, events: mpsc::Sender<SpaEvent>) -> Arc<dyn SpaAdapter> {
        // Replacing the entry orphans the previous adapter's event stream;
        // the worker drops anything it still manages to emit.
        self.events.insert(spec.src.clone(), events.clone());

        Arc::new(BridgeSpa {
            src: spec.src.clone(),
            attached: self.attached.clone(),
            events,
        })
    }
}

struct BridgeSpa {
    src: String,
    attached: Arc<DashMap<String, mpsc::UnboundedSender<SpaRequest>>>,
    events: mpsc::Sender<SpaEvent>,
}

impl BridgeSpa {
    async fn send(&self, request: SpaRequest) {
        let tx = self.attached.get(&self.src).map(|entry| entry.value().clone());

        let delivered = match tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        };

        if !delivered {
            let reason = format!("no signaling backend attached at {}", self.src);
            let _ = self.events.send(SpaEvent::Error(reason)).await;
        }
    }
}

#[async_trait]
impl SpaAdapter for BridgeSpa {
    async fn connect(&self, credentials: Value) {
        self.send(SpaRequest::Connect { credentials }).await;
    }

    async fn disconnect(&self) {
        self.send(SpaRequest::Disconnect {}).await;
    }

    async fn presence_request(&self) {
        self.send(SpaRequest::PresenceRequest {}).await;
    }

    async fn call_offer(&self, offer: Offer) {
        self.send(SpaRequest::CallOffer(offer)).await;
    }

    async fn call_answer(&self, answer: Answer) {
        self.send(SpaRequest::CallAnswer(answer)).await;
    }

    async fn call_hangup(&self, hangup: Hangup) {
        self.send(SpaRequest::CallHangup(hangup)).await;
    }

    async fn ice_candidate(&self, candidate: IceCandidate) {
        self.send(SpaRequest::IceCandidate(candidate)).await;
    }
}

pub async fn spa_ws_handler(
    ws: WebSocketUpgrade,
    Path(src): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_backend(socket, src, state))
}

async fn handle_backend(socket: WebSocket, src: String, state: AppState) {
    info!("Signaling backend attached: {}", src);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<SpaRequest>();

    state.bridge.attach(&src, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            match serde_json::to_string(&request) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => error!("Failed to serialize SPA request: {}", e),
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let bridge = state.bridge.clone();
        let src = src.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SpaEvent>(&text) {
                        Ok(event) => bridge.deliver(&src, event).await,
                        Err(e) => warn!("Invalid SPA event from {}: {:?}", src, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.bridge.detach(&src);
    state
        .bridge
        .deliver(&src, SpaEvent::Disconnected { code: CLOSE_ABNORMAL })
        .await;

    info!("Signaling backend detached: {}", src);
}
