//! Shared types for the N-Auth client workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
