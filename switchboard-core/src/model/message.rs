use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::payload::{Answer, Hangup, IceCandidate, Offer};
use crate::model::user::RosterEntry;

/// Contact list pushed by an import source (e.g. an address book service).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactsUpdate {
    pub contacts: Vec<Contact>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub username: String,
}

/// Inbound topic-tagged envelope, UI surface -> worker.
///
/// Call payloads stay raw here; handlers run them through the codec so a
/// malformed body is rejected with the missing field named instead of a
/// generic decode error. Unknown topics decode to `Unknown` and are ignored
/// by the dispatcher, which keeps old workers compatible with newer UIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "topic", content = "data", rename_all = "kebab-case")]
pub enum WorkerMessage {
    SidebarReady {},
    ChatWindowReady {},
    PortClosing {},
    Contacts(ContactsUpdate),
    ConversationOpen { peer: String },
    SpaEnable(Value),
    SpaDisable(String),
    PresenceRequest {},
    CallOffer(Value),
    CallAnswer(Value),
    CallHangup(Value),
    IceCandidate(Value),
    #[serde(other, deserialize_with = "ignore_contents")]
    Unknown,
}

/// With adjacent tagging, `#[serde(other)]` alone rejects envelopes whose
/// unknown topic still carries a `data` payload; discard it instead.
fn ignore_contents<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| ())
}

/// Outbound topic-tagged envelope, worker -> UI surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "topic", content = "data", rename_all = "kebab-case")]
pub enum PortEvent {
    WorkerReady {},
    Users(Vec<RosterEntry>),
    SpaConnected {},
    SpaError(String),
    /// Carries the channel close code; 1000 is a normal close and roster
    /// UIs suppress it from the error display.
    PresenceUnavailable(u16),
    Error(String),
    UserNick { nick: String },
    ConversationOpen { peer: String },
    CallOffer(Offer),
    CallAnswer(Answer),
    CallHangup(Hangup),
    IceCandidate(IceCandidate),
}
