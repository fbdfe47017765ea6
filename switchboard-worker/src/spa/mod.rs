mod adapter;
mod handle;

pub use adapter::*;
pub use handle::*;
