pub mod conversation;
pub mod ports;
pub mod spa;
pub mod user;
pub mod worker;

pub use conversation::{Conversation, ConversationState, Conversations};
pub use ports::{Port, PortRegistry};
pub use spa::{SpaAdapter, SpaConnector, SpaHandle, SpaState};
pub use user::{Presence, Roster, UserState};
pub use worker::{Worker, WorkerCommand, WorkerContext};
