//! HTTP client for tile requests
//!
//! A thin wrapper over a shared [`reqwest::Client`] carrying the fixed
//! identifying user agent and request timeouts. The wrapper draws the
//! error boundary the pipeline relies on: failure to *issue* a request is
//! a fatal transport error, while any HTTP response (whatever its status)
//! is handed back for the pipeline's retry policy to judge.

use reqwest::{Client, Response};

use crate::constants::http;
use crate::errors::{FetchError, FetchResult};

/// Shared HTTP client for fetching tiles
#[derive(Debug, Clone)]
pub struct TileClient {
    client: Client,
}

impl TileClient {
    /// Build the client with the standard user agent and timeouts
    pub fn new() -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(http::USER_AGENT)
            .timeout(http::REQUEST_TIMEOUT)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Issue a single GET for a tile URL. Scheme selection (http vs https)
    /// comes from the URL itself.
    pub async fn get(&self, url: &str) -> FetchResult<Response> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_default_settings() {
        assert!(TileClient::new().is_ok());
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Grab a free port and release it so the connection is refused
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = TileClient::new().unwrap();
        let result = client.get(&format!("http://127.0.0.1:{port}/0/0/0.png")).await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
