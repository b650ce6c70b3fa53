//! HTTP transport used by the quote fetcher.
//!
//! Providers only describe requests. The transport performs them and maps
//! HTTP-level failures into [`MarketDataError`], so direct and relayed calls
//! share the same classification.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::provider::QuoteRequest;

/// Performs a GET request and returns the response body.
///
/// `provider` is only used to label errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        request: &QuoteRequest,
        timeout: Duration,
        provider: &str,
    ) -> Result<String, MarketDataError>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        request: &QuoteRequest,
        timeout: Duration,
        provider: &str,
    ) -> Result<String, MarketDataError> {
        let mut builder = self.client.get(&request.url).timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        debug!("{} request: {}", provider, redact(&request.url));

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: provider.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: provider.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: provider.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        // Quota exhaustion on keyed APIs and bot blocking on Yahoo both show up as 403.
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(MarketDataError::RateLimited {
                provider: provider.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::ProviderError {
                provider: provider.to_string(),
                message: format!("HTTP {} - {}", status, truncate(&body, 200)),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: provider.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: provider.to_string(),
                    message: format!("Failed to read response: {}", e),
                }
            }
        })
    }
}

/// Strips the query string so API keys never reach the logs.
fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_drops_query() {
        assert_eq!(
            redact("https://www.alphavantage.co/query?function=GLOBAL_QUOTE&apikey=SECRET"),
            "https://www.alphavantage.co/query"
        );
        assert_eq!(redact("https://finnhub.io/api/v1"), "https://finnhub.io/api/v1");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
