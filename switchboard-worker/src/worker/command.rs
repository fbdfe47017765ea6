use switchboard_core::{PortEvent, PortId, WorkerMessage};
use tokio::sync::mpsc;

/// Commands entering the worker from the host channel (WebSocket gateway or
/// test harness).
pub enum WorkerCommand {
    /// A new UI surface connected; `tx` is its send capability.
    PortOpened {
        id: PortId,
        tx: mpsc::UnboundedSender<PortEvent>,
    },

    /// The host channel saw the surface go away.
    PortClosed { id: PortId },

    /// A topic-tagged message from a connected surface.
    Message { id: PortId, message: WorkerMessage },
}
