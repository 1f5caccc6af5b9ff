//! Infrastructure layer for fetching, parsing, persistence and configuration
//!
//! Concrete implementations behind the domain traits: the HTTP and
//! headless-browser fetchers, the selector-based field extractor, the
//! sqlx repositories, the TTL snapshot cache, and process plumbing
//! (config, logging, error taxonomy).

pub mod browser_client;
pub mod cache;
pub mod collectors;
pub mod config;
pub mod database_connection;
pub mod html_parser;
pub mod http_client;
pub mod logging;
pub mod player_repository;
pub mod scrape_error;
pub mod team_repository;

// Re-export commonly used items
pub use browser_client::{BrowserClient, BrowserClientConfig};
pub use cache::SnapshotCache;
pub use collectors::SiteCollector;
pub use config::AppConfig;
pub use database_connection::DatabaseConnection;
pub use html_parser::{LeagueDataExtractor, SelectorConfig};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::init_logging;
pub use player_repository::SqlitePlayerRepository;
pub use scrape_error::{ScrapeError, ScrapeResult};
pub use team_repository::SqliteTeamRepository;
