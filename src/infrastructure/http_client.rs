//! Static HTTP fetcher for server-rendered pages
//!
//! Plain GET with a browser-like identification header, an explicit
//! request timeout and a rate limiter so the batch stays polite to the
//! source site. No retry logic: a failed fetch is reported upward and
//! the caller moves on to the next entity.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, direct::NotKeyed},
};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // The stats pages refuse requests without a browser-like UA.
            user_agent: "Mozilla/5.0".to_string(),
            timeout_seconds: 30,
            max_requests_per_second: 5,
            follow_redirects: true,
        }
    }
}

/// Rate-limited HTTP client for static page fetches.
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| ScrapeError::Browser {
                message: format!("invalid user agent: {e}"),
            })?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| ScrapeError::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second.max(1))
                .unwrap_or(NonZeroU32::MIN),
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Fetch a URL and return the response body as markup text.
    ///
    /// Non-2xx responses map to `FetchFailed`, connection problems to
    /// `Network`.
    pub async fn get_text(&self, url: &str) -> ScrapeResult<String> {
        self.rate_limiter.until_ready().await;

        tracing::debug!("fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::FetchFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await.map_err(|e| ScrapeError::Network {
            url: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

        tracing::debug!("fetched {} ({} chars)", url, text.len());
        Ok(text)
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_defaults() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn zero_rate_limit_is_clamped() {
        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_ok());
    }
}
