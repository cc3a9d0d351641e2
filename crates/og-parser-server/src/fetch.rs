//! Retrieval of the raw document behind a URL.
//!
//! Not a browser, just HTTP. Follows a bounded number of redirects, retries
//! 5xx responses and transport errors with exponential backoff, and caps the
//! body size.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ServerConfig;
use crate::types::{ServerError, ServerResult};

/// Source of raw HTML for a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> ServerResult<String>;
}

/// `reqwest`-backed fetcher used by the service.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpFetcher {
    const MAX_RETRIES: u32 = 2;

    pub fn new(config: &ServerConfig) -> ServerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.fetch_timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ServerError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    async fn get_with_retry(&self, url: &str) -> ServerResult<reqwest::Response> {
        let mut retries = 0u32;

        loop {
            match self.client.get(url).send().await {
                Ok(r) if r.status().is_server_error() && retries < Self::MAX_RETRIES => {
                    let status = r.status().as_u16();
                    tracing::debug!(url, status, retries, "retrying after server error");
                }
                Ok(r) => return Ok(r),
                Err(e) if retries < Self::MAX_RETRIES && !e.is_builder() => {
                    tracing::debug!(url, retries, "retrying after transport error: {e}");
                }
                Err(e) => return Err(e.into()),
            }

            retries += 1;
            let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> ServerResult<String> {
        let mut response = self.get_with_retry(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerError::Retrieval(format!(
                "upstream returned {} for {url}",
                status.as_u16()
            )));
        }

        let body = read_capped(&mut response, self.max_body_bytes).await?;
        tracing::debug!(url, bytes = body.len(), "fetched document");

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Read the body chunk by chunk, stopping once `limit` bytes are held.
/// The rest of the stream is never pulled off the connection.
async fn read_capped(response: &mut reqwest::Response, limit: usize) -> ServerResult<Vec<u8>> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            if chunk.len() > room {
                tracing::debug!(limit, "response body truncated at size cap");
            }
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
