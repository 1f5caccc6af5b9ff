//! Application configuration
//!
//! Defaults cover the normal case; a JSON config file overrides them and
//! a couple of environment variables override the file (useful for tests
//! and deployments). Base URLs live here, never in the scraping logic.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::infrastructure::browser_client::BrowserClientConfig;
use crate::infrastructure::http_client::HttpClientConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub http: HttpClientConfig,
    pub browser: BrowserClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the league site all page URLs are built from.
    pub base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.premierleague.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/squadstats.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL of the club index snapshot.
    pub team_list_ttl_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            team_list_ttl_hours: 24,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, falling back to defaults when the file
    /// does not exist yet (the defaults are written back so the file is
    /// there to edit next time).
    pub async fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            info!("loaded configuration from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(path, serde_json::to_string_pretty(&config)?)
                .await
                .with_context(|| format!("failed to write default config to {}", path.display()))?;
            info!("wrote default configuration to {}", path.display());
            Ok(config)
        }
    }

    /// Environment variables take precedence over the config file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SQUADSTATS_DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(base_url) = std::env::var("SQUADSTATS_BASE_URL") {
            self.source.base_url = base_url;
        }
    }
}
