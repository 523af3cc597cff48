//! Token secrets, storage keys, and the session context that mediates token state.

pub mod secret;
pub mod session;

pub use secret::*;
pub use session::*;
