//! Repository interfaces for the persisted team/player store
//!
//! The store must support atomic create-or-update keyed by the natural
//! keys (team id, player id). Stats writes are conditional: a populated
//! stats bag is only overwritten when the caller forces it.

use async_trait::async_trait;
use anyhow::Result;

use crate::domain::entities::{Player, SquadMember, StatsBag, Team, TeamListing};

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Create-or-update by team id; name and crest always take the
    /// latest scraped values.
    async fn upsert(&self, listing: &TeamListing) -> Result<()>;
    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>>;
    async fn find_all(&self) -> Result<Vec<Team>>;
    async fn count(&self) -> Result<u32>;
}

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Create-or-update by player id. Name, position, nationality,
    /// images and the team assignment always take the latest scraped
    /// values; the stats column is left untouched.
    async fn upsert_roster_entry(&self, team_id: i64, member: &SquadMember) -> Result<()>;
    async fn find_by_id(&self, player_id: i64) -> Result<Option<Player>>;
    async fn find_by_team(&self, team_id: i64) -> Result<Vec<Player>>;
    /// Case-insensitive substring match on the display name.
    async fn search_by_name(&self, query: &str) -> Result<Vec<Player>>;
    /// Write the stats bag. Without `force` the write only fires when the
    /// stored bag is empty; returns whether a row was actually updated.
    async fn write_stats(&self, player_id: i64, stats: &StatsBag, force: bool) -> Result<bool>;
    async fn count(&self) -> Result<u32>;
}
