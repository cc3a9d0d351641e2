//! Transport layer for the parse service.

pub mod http;

pub use http::{router, serve, AppState};
