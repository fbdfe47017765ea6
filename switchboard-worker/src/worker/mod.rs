mod command;
mod context;
mod handlers;
mod worker;

pub use command::*;
pub use context::*;
pub use worker::*;
