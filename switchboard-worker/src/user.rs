use switchboard_core::RosterEntry;

/// Connection presence of the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Disconnected,
    Connecting,
    Connected,
}

/// The one current-user record of a worker instance. An empty name means
/// nobody is signed in.
pub struct UserState {
    name: String,
    presence: Presence,
}

impl UserState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            presence: Presence::Disconnected,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn signed_in(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn set_presence(&mut self, presence: Presence) {
        self.presence = presence;
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.presence = Presence::Disconnected;
    }
}

impl Default for UserState {
    fn default() -> Self {
        Self::new()
    }
}

/// Broadcastable set of peers. Updates replace the whole list, last write
/// wins; there is no incremental diffing.
#[derive(Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, entries: Vec<RosterEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
