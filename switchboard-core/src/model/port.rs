use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque id of one connected UI surface, assigned by the host channel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
pub struct PortId(pub Uuid);

impl PortId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PortId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
