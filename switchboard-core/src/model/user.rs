use serde::{Deserialize, Serialize};

/// One peer visible in the roster. Roster updates replace the whole list,
/// so this carries nothing that would need diffing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub nick: String,
}

impl RosterEntry {
    pub fn new(nick: impl Into<String>) -> Self {
        Self { nick: nick.into() }
    }
}
