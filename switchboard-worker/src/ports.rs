use std::collections::HashMap;

use switchboard_core::{PortEvent, PortId};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// One connected UI surface: an id assigned by the host channel and the
/// send half of its event channel. A port in the registry is assumed live
/// until a send fails or the host channel reports it closed.
pub struct Port {
    id: PortId,
    tx: mpsc::UnboundedSender<PortEvent>,
    sidebar: bool,
}

impl Port {
    pub fn new(id: PortId, tx: mpsc::UnboundedSender<PortEvent>) -> Self {
        Self {
            id,
            tx,
            sidebar: false,
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    pub fn mark_sidebar(&mut self) {
        self.sidebar = true;
    }

    pub fn is_sidebar(&self) -> bool {
        self.sidebar
    }

    /// Deliver an event to the surface. Returns `false` when the receiving
    /// side is gone; the caller decides whether to drop the port.
    pub fn post(&self, event: PortEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Every connected UI surface, keyed by port id. Removal is the only way
/// to stop delivering to a port.
#[derive(Default)]
pub struct PortRegistry {
    ports: HashMap<PortId, Port>,
}

impl PortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, port: Port) {
        if self.ports.insert(port.id, port).is_some() {
            warn!("replaced an already-registered port");
        }
    }

    pub fn remove(&mut self, id: &PortId) -> Option<Port> {
        self.ports.remove(id)
    }

    pub fn find(&self, id: &PortId) -> Option<&Port> {
        self.ports.get(id)
    }

    pub fn find_mut(&mut self, id: &PortId) -> Option<&mut Port> {
        self.ports.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Best-effort fan-out: deliver to every registered port; a dead port
    /// never blocks delivery to the others. Dead ports are dropped from the
    /// registry and their ids returned so bound state can be cleaned up.
    pub fn broadcast(&mut self, event: &PortEvent) -> Vec<PortId> {
        let dead: Vec<PortId> = self
            .ports
            .values()
            .filter(|port| !port.post(event.clone()))
            .map(|port| port.id)
            .collect();

        for id in &dead {
            debug!(port = %id, "dropping dead port found during broadcast");
            self.ports.remove(id);
        }

        dead
    }
}
