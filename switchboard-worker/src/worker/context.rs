use crate::conversation::Conversations;
use crate::ports::PortRegistry;
use crate::spa::SpaHandle;
use crate::user::{Roster, UserState};

/// Every piece of mutable worker state, created once at startup and dropped
/// when the command channel closes. Only the worker's handlers touch it;
/// nothing here is shared across tasks.
pub struct WorkerContext {
    pub ports: PortRegistry,
    pub user: UserState,
    pub roster: Roster,
    pub spa: Option<SpaHandle>,
    pub conversations: Conversations,
}

impl WorkerContext {
    pub fn new() -> Self {
        Self {
            ports: PortRegistry::new(),
            user: UserState::new(),
            roster: Roster::new(),
            spa: None,
            conversations: Conversations::new(),
        }
    }
}

impl Default for WorkerContext {
    fn default() -> Self {
        Self::new()
    }
}
