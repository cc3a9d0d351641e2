//! og-parser server — fetches a page over HTTP and returns its Open Graph metadata.

pub mod config;
pub mod fetch;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use fetch::{Fetcher, HttpFetcher};
pub use transport::{router, serve, AppState};
