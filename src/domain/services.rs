//! Collector service traits for the scraping pipeline
//!
//! Each trait covers one fetch-and-extract step of the refresh pipeline,
//! so the orchestrator can be exercised against stubs in tests while the
//! production implementation drives the real site.

use async_trait::async_trait;
use anyhow::Result;

use crate::domain::entities::{PlayerSheet, SquadMember, TeamListing};

/// Collects the club index (the full list of teams in the league).
#[async_trait]
pub trait TeamListCollector: Send + Sync {
    async fn collect_team_list(&self) -> Result<Vec<TeamListing>>;
}

/// Collects the full player roster of one team.
#[async_trait]
pub trait SquadCollector: Send + Sync {
    async fn collect_squad(&self, team: &TeamListing) -> Result<Vec<SquadMember>>;
}

/// Collects the per-player stats sheet from the player detail page.
#[async_trait]
pub trait PlayerStatsCollector: Send + Sync {
    async fn collect_player_sheet(&self, player_id: i64, player_name: &str) -> Result<PlayerSheet>;
}
