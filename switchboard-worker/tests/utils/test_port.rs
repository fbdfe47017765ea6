use std::time::Duration;

use switchboard_core::{PortEvent, PortId, WorkerMessage};
use switchboard_worker::WorkerCommand;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// A fake UI surface wired straight into the worker's command channel.
pub struct TestPort {
    pub id: PortId,
    commands: mpsc::Sender<WorkerCommand>,
    rx: mpsc::UnboundedReceiver<PortEvent>,
}

/// Register a fresh port with the worker.
pub async fn open_port(commands: &mpsc::Sender<WorkerCommand>) -> TestPort {
    let id = PortId::new();
    let (tx, rx) = mpsc::unbounded_channel();

    commands
        .send(WorkerCommand::PortOpened { id, tx })
        .await
        .expect("worker should be running");

    TestPort {
        id,
        commands: commands.clone(),
        rx,
    }
}

impl TestPort {
    pub async fn send(&self, message: WorkerMessage) {
        self.commands
            .send(WorkerCommand::Message {
                id: self.id,
                message,
            })
            .await
            .expect("worker should be running");
    }

    /// Report this surface closed, as the host channel would.
    pub async fn close(&self) {
        self.commands
            .send(WorkerCommand::PortClosed { id: self.id })
            .await
            .expect("worker should be running");
    }

    /// Next event delivered to this surface.
    pub async fn recv(&mut self) -> PortEvent {
        timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("timed out waiting for a port event")
            .expect("port channel closed")
    }

    /// Assert nothing is delivered within a short grace period.
    pub async fn expect_silence(&mut self) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(event) = self.rx.try_recv() {
            panic!("unexpected event delivered: {event:?}");
        }
    }
}
