//! Typed entry point for signaling payload validation.
//!
//! Handlers never pattern-match raw JSON: they name the kind they expect and
//! get either a validated payload or a `ValidationError` naming the field
//! that was missing or malformed.

use serde_json::Value;

use crate::error::ValidationError;
use crate::model::{Answer, Hangup, IceCandidate, Offer, SpaSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Offer,
    Answer,
    Hangup,
    IceCandidate,
    SpaSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Offer(Offer),
    Answer(Answer),
    Hangup(Hangup),
    IceCandidate(IceCandidate),
    SpaSpec(SpaSpec),
}

/// Validate `raw` as a payload of the given kind.
pub fn parse(kind: PayloadKind, raw: &Value) -> Result<Payload, ValidationError> {
    match kind {
        PayloadKind::Offer => Offer::parse(raw).map(Payload::Offer),
        PayloadKind::Answer => Answer::parse(raw).map(Payload::Answer),
        PayloadKind::Hangup => Hangup::parse(raw).map(Payload::Hangup),
        PayloadKind::IceCandidate => IceCandidate::parse(raw).map(Payload::IceCandidate),
        PayloadKind::SpaSpec => SpaSpec::parse(raw).map(Payload::SpaSpec),
    }
}

macro_rules! payload_try_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl TryFrom<Payload> for $ty {
            type Error = Payload;

            fn try_from(payload: Payload) -> Result<Self, Payload> {
                match payload {
                    Payload::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        })*
    };
}

payload_try_from! {
    Offer => Offer,
    Answer => Answer,
    Hangup => Hangup,
    IceCandidate => IceCandidate,
    SpaSpec => SpaSpec,
}

/// Inverse of [`parse`]: render a payload back to its wire shape.
pub fn to_wire(payload: &Payload) -> Value {
    match payload {
        Payload::Offer(offer) => offer.to_wire(),
        Payload::Answer(answer) => answer.to_wire(),
        Payload::Hangup(hangup) => hangup.to_wire(),
        Payload::IceCandidate(candidate) => candidate.to_wire(),
        Payload::SpaSpec(spec) => spec.to_wire(),
    }
}
