//! DOM fetcher for client-side rendered pages
//!
//! The club index and squad pages are assembled by JavaScript, so a
//! plain GET returns an empty shell. This client drives a headless
//! Chrome session: navigate, block until a marker element appears (or a
//! timeout elapses), then hand back the rendered document. The browser
//! process is torn down on every exit path because `Browser` and `Tab`
//! close on drop.
//!
//! Launching a browser per call is expensive; callers short-circuit
//! through the snapshot cache rather than leaning on this directly.

use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};

use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BrowserClientConfig {
    /// How long to wait for the marker element before giving up.
    pub wait_timeout_seconds: u64,
}

impl Default for BrowserClientConfig {
    fn default() -> Self {
        Self {
            wait_timeout_seconds: 10,
        }
    }
}

pub struct BrowserClient {
    config: BrowserClientConfig,
}

impl BrowserClient {
    pub fn new(config: BrowserClientConfig) -> Self {
        Self { config }
    }

    /// Navigate to `url`, wait until an element matching `marker` is
    /// present, and return the rendered document HTML.
    ///
    /// `headless_chrome` is a blocking API, so the session runs on the
    /// blocking thread pool.
    pub async fn fetch_rendered(&self, url: &str, marker: &str) -> ScrapeResult<String> {
        let url = url.to_string();
        let marker = marker.to_string();
        let timeout_seconds = self.config.wait_timeout_seconds;

        tracing::info!("rendering {} (marker '{}')", url, marker);

        tokio::task::spawn_blocking(move || {
            Self::fetch_blocking(&url, &marker, timeout_seconds)
        })
        .await
        .map_err(|e| ScrapeError::Browser {
            message: format!("browser task panicked: {e}"),
        })?
    }

    fn fetch_blocking(url: &str, marker: &str, timeout_seconds: u64) -> ScrapeResult<String> {
        let browser = Browser::new(LaunchOptions {
            headless: true,
            ..Default::default()
        })
        .map_err(|e| ScrapeError::Browser {
            message: format!("failed to launch headless browser: {e}"),
        })?;

        let tab = browser.new_tab().map_err(|e| ScrapeError::Browser {
            message: format!("failed to open tab: {e}"),
        })?;

        tab.navigate_to(url).map_err(|e| ScrapeError::Browser {
            message: format!("navigation to {url} failed: {e}"),
        })?;
        tab.wait_until_navigated().map_err(|e| ScrapeError::Browser {
            message: format!("navigation to {url} did not settle: {e}"),
        })?;

        tab.wait_for_element_with_custom_timeout(marker, Duration::from_secs(timeout_seconds))
            .map_err(|_| ScrapeError::FetchTimeout {
                url: url.to_string(),
                marker: marker.to_string(),
                seconds: timeout_seconds,
            })?;

        tab.get_content().map_err(|e| ScrapeError::Browser {
            message: format!("failed to read rendered content from {url}: {e}"),
        })
        // browser and tab drop here, closing the Chrome process
    }
}
