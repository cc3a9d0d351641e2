//! Configuration loading and resolution.
//!
//! Every setting resolves as: explicit value, then environment, then default.

/// Port used when neither `--addr`, `OG_PARSER_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Runtime settings for the service and its fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub fetch_timeout_ms: u64,
    pub max_redirects: usize,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: default_user_agent(),
        }
    }
}

impl ServerConfig {
    /// Build a config from CLI flags, falling back to the environment.
    pub fn resolve(addr: Option<&str>, timeout_ms: Option<u64>) -> Self {
        Self {
            addr: resolve_addr(addr),
            fetch_timeout_ms: resolve_timeout_ms(timeout_ms),
            ..Self::default()
        }
    }
}

/// Resolve the listen address.
pub fn resolve_addr(explicit: Option<&str>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    if let Ok(addr) = std::env::var("OG_PARSER_ADDR") {
        return addr;
    }

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);

    format!("0.0.0.0:{port}")
}

/// Resolve the upstream fetch timeout in milliseconds.
pub fn resolve_timeout_ms(explicit: Option<u64>) -> u64 {
    explicit
        .or_else(|| {
            std::env::var("OG_PARSER_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS)
}

fn default_user_agent() -> String {
    format!("og-parser/{}", env!("CARGO_PKG_VERSION"))
}
