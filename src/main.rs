//! Batch entry point: full refresh of teams, squads and player stats.
//!
//! Invoked with no arguments. Reports step-by-step progress through the
//! log and a final summary; exits non-zero when the run recorded any
//! per-entity failures so cron-style schedulers notice.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use squadstats::application::refresh::RefreshEngine;
use squadstats::infrastructure::{
    AppConfig, BrowserClient, DatabaseConnection, HttpClient, LeagueDataExtractor, SiteCollector,
    SnapshotCache, SqlitePlayerRepository, SqliteTeamRepository, init_logging,
};

const CONFIG_PATH: &str = "config/squadstats.json";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging()?;

    let mut config = AppConfig::load(Path::new(CONFIG_PATH)).await?;
    config.apply_env_overrides();

    let db = DatabaseConnection::new(&config.database.url).await?;
    db.migrate().await?;
    let pool = Arc::new(db.pool().clone());

    let team_repo = Arc::new(SqliteTeamRepository::new(pool.clone()));
    let player_repo = Arc::new(SqlitePlayerRepository::new(pool));

    let collector = Arc::new(SiteCollector::new(
        Arc::new(BrowserClient::new(config.browser.clone())),
        Arc::new(HttpClient::new(config.http.clone())?),
        LeagueDataExtractor::new()?,
        config.source.base_url.clone(),
    ));

    let engine = RefreshEngine::new(
        collector.clone(),
        collector.clone(),
        collector,
        team_repo,
        player_repo,
        SnapshotCache::new(Duration::from_secs(config.cache.team_list_ttl_hours * 3600)),
    );

    tracing::info!("starting team and player data update");
    let report = engine.refresh_all().await?;

    for failure in &report.failures {
        tracing::warn!("failed: {} ({})", failure.subject, failure.reason);
    }
    tracing::info!(
        "updated {} teams and {} players; {} stat sheets fetched, {} already complete",
        report.teams_synced,
        report.players_synced,
        report.sheets_fetched,
        report.sheets_skipped
    );

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
