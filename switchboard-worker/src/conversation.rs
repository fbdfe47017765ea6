use std::collections::{HashMap, VecDeque};

use switchboard_core::{Offer, PortId};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Created, no call window bound yet.
    Pending,
    /// A window reported ready and owns the session.
    Bound,
    /// An answer has been observed on either side.
    Active,
    Ended,
}

/// One peer-to-peer call session. An offer that arrives before a window
/// binds is stashed and flushed on bind.
pub struct Conversation {
    peer: String,
    port: Option<PortId>,
    state: ConversationState,
    stashed_offer: Option<Offer>,
}

impl Conversation {
    fn new(peer: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            port: None,
            state: ConversationState::Pending,
            stashed_offer: None,
        }
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn port(&self) -> Option<PortId> {
        self.port
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Bind the ready window and hand back any offer waiting for it.
    pub fn bind(&mut self, port: PortId) -> Option<Offer> {
        self.port = Some(port);
        self.state = ConversationState::Bound;
        self.stashed_offer.take()
    }

    pub fn stash_offer(&mut self, offer: Offer) {
        if self.stashed_offer.replace(offer).is_some() {
            debug!(peer = %self.peer, "overwrote a previously stashed offer");
        }
    }

    pub fn answered(&mut self) {
        self.state = ConversationState::Active;
    }
}

/// All live call sessions, keyed by peer identity, plus the FIFO of
/// sessions still waiting for their window to report ready.
#[derive(Default)]
pub struct Conversations {
    sessions: HashMap<String, Conversation>,
    awaiting_window: VecDeque<String>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for `peer`, replacing any existing one. Returns
    /// `true` when an in-flight session was overwritten.
    pub fn open(&mut self, peer: &str) -> bool {
        let replaced = self
            .sessions
            .insert(peer.to_owned(), Conversation::new(peer))
            .is_some();

        if !self.awaiting_window.iter().any(|waiting| waiting == peer) {
            self.awaiting_window.push_back(peer.to_owned());
        }

        replaced
    }

    /// Bind `port` to the oldest session still waiting for a window.
    /// Returns the peer and any offer stashed while unbound.
    pub fn bind_next(&mut self, port: PortId) -> Option<(String, Option<Offer>)> {
        while let Some(peer) = self.awaiting_window.pop_front() {
            let Some(session) = self.sessions.get_mut(&peer) else {
                // Session was torn down before its window arrived.
                continue;
            };
            if session.state != ConversationState::Pending {
                continue;
            }
            let stashed = session.bind(port);
            return Some((peer, stashed));
        }
        None
    }

    pub fn get(&self, peer: &str) -> Option<&Conversation> {
        self.sessions.get(peer)
    }

    pub fn get_mut(&mut self, peer: &str) -> Option<&mut Conversation> {
        self.sessions.get_mut(peer)
    }

    pub fn end(&mut self, peer: &str) -> Option<Conversation> {
        self.awaiting_window.retain(|waiting| waiting != peer);
        let mut session = self.sessions.remove(peer)?;
        session.state = ConversationState::Ended;
        Some(session)
    }

    /// End every session bound to `port`; returns the affected peers.
    pub fn clear_bound_to(&mut self, port: PortId) -> Vec<String> {
        let peers: Vec<String> = self
            .sessions
            .values()
            .filter(|session| session.port == Some(port))
            .map(|session| session.peer.clone())
            .collect();

        for peer in &peers {
            if self.end(peer).is_some() {
                warn!(%peer, %port, "call window closed, ending conversation");
            }
        }
        peers
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
