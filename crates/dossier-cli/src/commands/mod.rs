//! Command implementations.

mod ask;

pub use ask::{execute_ask, resolve_config};
