pub mod codec;
pub mod error;
pub mod model;

pub use codec::{Payload, PayloadKind};
pub use error::ValidationError;
pub use model::*;
