use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::payload::{Answer, Hangup, IceCandidate, Offer};
use crate::model::user::RosterEntry;

/// Request issued by the worker to the signaling backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum SpaRequest {
    Connect { credentials: Value },
    Disconnect {},
    PresenceRequest {},
    CallOffer(Offer),
    CallAnswer(Answer),
    CallHangup(Hangup),
    IceCandidate(IceCandidate),
}

/// Event emitted by the signaling backend into the worker. Failures are
/// always delivered here as `Error`, never raised across the adapter call
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum SpaEvent {
    /// Backend accepted the credentials; `addr` is the signed-in identity.
    Connected { addr: String },
    Disconnected { code: u16 },
    PresenceUnavailable { code: u16 },
    Users(Vec<RosterEntry>),
    Offer(Offer),
    Answer(Answer),
    Hangup(Hangup),
    IceCandidate(IceCandidate),
    Error(String),
}
