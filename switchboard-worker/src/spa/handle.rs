use std::sync::Arc;

use switchboard_core::SpaSpec;

use crate::spa::SpaAdapter;

/// Lifecycle of an enabled service provider adapter. Reconnection is never
/// automatic; a failed or disconnected adapter stays down until a fresh
/// enable replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaState {
    Connecting,
    Connected,
    Disconnected,
}

/// The single active backend. `epoch` identifies this handle on the
/// worker's SPA event channel, so events from an adapter that has since
/// been replaced can be told apart from the live one and dropped.
pub struct SpaHandle {
    name: String,
    state: SpaState,
    epoch: u64,
    adapter: Arc<dyn SpaAdapter>,
}

impl SpaHandle {
    pub fn new(spec: &SpaSpec, epoch: u64, adapter: Arc<dyn SpaAdapter>) -> Self {
        Self {
            name: spec.name.clone(),
            state: SpaState::Connecting,
            epoch,
            adapter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SpaState {
        self.state
    }

    pub fn set_state(&mut self, state: SpaState) {
        self.state = state;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn adapter(&self) -> Arc<dyn SpaAdapter> {
        self.adapter.clone()
    }
}
