use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ValidationError;

fn field<'a>(raw: &'a Value, name: &'static str) -> Result<&'a Value, ValidationError> {
    match raw.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name)),
        Some(value) => Ok(value),
    }
}

fn string_field(raw: &Value, name: &'static str) -> Result<String, ValidationError> {
    field(raw, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::InvalidField(name))
}

/// SDP blob carried by an offer: the description text plus its type tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    pub sdp: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Outgoing or incoming call offer for a given peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Offer {
    pub peer: String,
    pub offer: SessionDescription,
}

impl Offer {
    pub fn parse(raw: &Value) -> Result<Self, ValidationError> {
        let peer = string_field(raw, "peer")?;
        let body = field(raw, "offer")?;
        let sdp = body
            .get("sdp")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingField("offer.sdp"))?
            .to_owned();
        let kind = body
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ValidationError::MissingField("offer.type"))?
            .to_owned();

        Ok(Self {
            peer,
            offer: SessionDescription { sdp, kind },
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "peer": self.peer,
            "offer": {"sdp": self.offer.sdp, "type": self.offer.kind},
        })
    }
}

/// Answer to a previously sent offer. The answer body is opaque to the
/// router and forwarded untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    pub peer: String,
    pub answer: Value,
}

impl Answer {
    pub fn parse(raw: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            peer: string_field(raw, "peer")?,
            answer: field(raw, "answer")?.clone(),
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({"peer": self.peer, "answer": self.answer})
    }
}

/// Hangup carries no body, but still names the peer being hung up on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hangup {
    pub peer: String,
}

impl Hangup {
    pub fn parse(raw: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            peer: string_field(raw, "peer")?,
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({"peer": self.peer})
    }
}

/// Trickle ICE candidate, opaque past the peer it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IceCandidate {
    pub peer: String,
    pub candidate: Value,
}

impl IceCandidate {
    pub fn parse(raw: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            peer: string_field(raw, "peer")?,
            candidate: field(raw, "candidate")?.clone(),
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({"peer": self.peer, "candidate": self.candidate})
    }
}

/// Description of a service provider adapter to enable: a display name,
/// the source the backend is reachable at, and credentials to connect with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpaSpec {
    pub name: String,
    pub src: String,
    pub credentials: Value,
}

impl SpaSpec {
    pub fn parse(raw: &Value) -> Result<Self, ValidationError> {
        Ok(Self {
            name: string_field(raw, "name")?,
            src: string_field(raw, "src")?,
            credentials: field(raw, "credentials")?.clone(),
        })
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "name": self.name,
            "src": self.src,
            "credentials": self.credentials,
        })
    }
}
