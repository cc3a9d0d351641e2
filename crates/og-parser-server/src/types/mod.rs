//! Wire types and errors for the HTTP service.

pub mod error;
pub mod message;

pub use error::*;
pub use message::*;
