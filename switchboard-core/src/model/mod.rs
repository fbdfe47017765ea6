mod message;
mod payload;
mod port;
mod spa;
mod user;

pub use message::{Contact, ContactsUpdate, PortEvent, WorkerMessage};
pub use payload::{Answer, Hangup, IceCandidate, Offer, SessionDescription, SpaSpec};
pub use port::PortId;
pub use spa::{SpaEvent, SpaRequest};
pub use user::RosterEntry;
