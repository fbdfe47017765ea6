use std::sync::Arc;

use switchboard_core::{PortEvent, PortId, SpaEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::ports::Port;
use crate::spa::SpaConnector;
use crate::worker::{WorkerCommand, WorkerContext};

/// SPA event tagged with the epoch of the handle it belongs to, so results
/// arriving after the handle was replaced can be dropped instead of
/// mutating state for a dead backend.
pub(crate) struct SpaSignal {
    pub epoch: u64,
    pub event: SpaEvent,
}

/// The message hub: owns all live state and processes exactly one command
/// or SPA event at a time. Handlers never block; backend calls are spawned
/// and their results come back as new SPA events.
pub struct Worker {
    pub(crate) ctx: WorkerContext,
    pub(crate) connector: Arc<dyn SpaConnector>,
    command_rx: mpsc::Receiver<WorkerCommand>,
    spa_rx: mpsc::Receiver<SpaSignal>,
    pub(crate) spa_tx: mpsc::Sender<SpaSignal>,
    pub(crate) next_epoch: u64,
}

impl Worker {
    pub fn new(connector: Arc<dyn SpaConnector>, command_rx: mpsc::Receiver<WorkerCommand>) -> Self {
        let (spa_tx, spa_rx) = mpsc::channel(256);

        Self {
            ctx: WorkerContext::new(),
            connector,
            command_rx,
            spa_rx,
            spa_tx,
            next_epoch: 0,
        }
    }

    pub async fn run(mut self) {
        info!("Worker event loop started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(c) => self.handle_command(c),
                        None => {
                            info!("Command channel closed. Shutting down worker.");
                            break;
                        }
                    }
                }

                signal = self.spa_rx.recv() => {
                    match signal {
                        Some(s) => self.handle_spa_signal(s),
                        None => {
                            warn!("SPA channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        info!("Worker event loop finished");
    }

    fn handle_command(&mut self, cmd: WorkerCommand) {
        match cmd {
            WorkerCommand::PortOpened { id, tx } => {
                debug!(port = %id, "registering new port");
                self.ctx.ports.add(Port::new(id, tx));
            }

            WorkerCommand::PortClosed { id } => self.on_port_closing(id),

            WorkerCommand::Message { id, message } => self.dispatch(id, message),
        }
    }

    /// Fan an event out to every port; conversations bound to ports found
    /// dead during the broadcast are ended.
    pub(crate) fn broadcast(&mut self, event: PortEvent) {
        for id in self.ctx.ports.broadcast(&event) {
            self.ctx.conversations.clear_bound_to(id);
        }
    }

    /// Deliver to a single port. A missing port is a benign teardown race;
    /// a dead one is removed together with its bound conversations.
    pub(crate) fn post_to(&mut self, id: PortId, event: PortEvent) {
        let Some(port) = self.ctx.ports.find(&id) else {
            debug!(port = %id, "dropping event for unregistered port");
            return;
        };

        if !port.post(event) {
            warn!(port = %id, "port channel dead, removing");
            self.ctx.ports.remove(&id);
            self.ctx.conversations.clear_bound_to(id);
        }
    }
}
