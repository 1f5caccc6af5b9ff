//! Batch refresh pipeline
//!
//! Sequences fetch -> extract -> synchronize for teams, squads and
//! player stats sheets, one entity at a time. The club index snapshot is
//! read through the TTL cache because it costs a full browser session.
//! One entity's failure is recorded and skipped; the batch carries on.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::domain::entities::{Player, TeamListing};
use crate::domain::repositories::{PlayerRepository, TeamRepository};
use crate::domain::services::{PlayerStatsCollector, SquadCollector, TeamListCollector};
use crate::infrastructure::cache::SnapshotCache;

const TEAM_LIST_CACHE_KEY: &str = "team-list";

/// Outcome summary of one batch run.
#[derive(Debug, Default, Clone)]
pub struct RefreshReport {
    pub teams_synced: u32,
    pub players_synced: u32,
    pub sheets_fetched: u32,
    /// Players skipped because their stored stats bag was already
    /// populated (the whole point of the durable stats cache).
    pub sheets_skipped: u32,
    pub failures: Vec<RefreshFailure>,
}

#[derive(Debug, Clone)]
pub struct RefreshFailure {
    pub subject: String,
    pub reason: String,
}

impl RefreshReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, subject: impl Into<String>, reason: impl ToString) {
        self.failures.push(RefreshFailure {
            subject: subject.into(),
            reason: reason.to_string(),
        });
    }
}

pub struct RefreshEngine {
    team_list: Arc<dyn TeamListCollector>,
    squads: Arc<dyn SquadCollector>,
    stats: Arc<dyn PlayerStatsCollector>,
    team_repo: Arc<dyn TeamRepository>,
    player_repo: Arc<dyn PlayerRepository>,
    list_cache: SnapshotCache<Vec<TeamListing>>,
}

impl RefreshEngine {
    pub fn new(
        team_list: Arc<dyn TeamListCollector>,
        squads: Arc<dyn SquadCollector>,
        stats: Arc<dyn PlayerStatsCollector>,
        team_repo: Arc<dyn TeamRepository>,
        player_repo: Arc<dyn PlayerRepository>,
        list_cache: SnapshotCache<Vec<TeamListing>>,
    ) -> Self {
        Self {
            team_list,
            squads,
            stats,
            team_repo,
            player_repo,
            list_cache,
        }
    }

    /// Current club index: the cached snapshot when fresh, otherwise a
    /// new fetch whose result is persisted and cached.
    pub async fn team_list(&self) -> Result<Vec<TeamListing>> {
        if let Some(cached) = self.list_cache.get(TEAM_LIST_CACHE_KEY).await {
            info!("serving team list from cache ({} teams)", cached.len());
            return Ok(cached);
        }

        let listings = self.team_list.collect_team_list().await?;
        for listing in &listings {
            self.team_repo.upsert(listing).await?;
        }
        self.list_cache
            .set(TEAM_LIST_CACHE_KEY, listings.clone())
            .await;

        info!("fetched team list ({} teams)", listings.len());
        Ok(listings)
    }

    /// Full refresh: team list, then per team the squad, then per player
    /// the stats sheet when the stored bag is still empty.
    ///
    /// A team list failure is fatal (there is nothing to iterate); any
    /// later failure affects only its own entity.
    pub async fn refresh_all(&self) -> Result<RefreshReport> {
        let mut report = RefreshReport::default();
        let listings = self.team_list().await?;

        for listing in &listings {
            info!("updating squad for team: {}", listing.name);
            self.team_repo.upsert(listing).await?;
            report.teams_synced += 1;

            let members = match self.squads.collect_squad(listing).await {
                Ok(members) => members,
                Err(e) => {
                    warn!("failed to collect squad for {}: {e:#}", listing.name);
                    report.record_failure(format!("squad of {}", listing.name), format!("{e:#}"));
                    continue;
                }
            };

            for member in &members {
                if let Err(e) = self
                    .player_repo
                    .upsert_roster_entry(listing.id, member)
                    .await
                {
                    warn!("failed to sync player {}: {e:#}", member.name);
                    report.record_failure(format!("player {}", member.name), format!("{e:#}"));
                    continue;
                }
                report.players_synced += 1;

                match self.sync_player_sheet(member.id, &member.name, false).await {
                    Ok(SheetOutcome::Fetched) => report.sheets_fetched += 1,
                    Ok(SheetOutcome::Skipped) => report.sheets_skipped += 1,
                    Ok(SheetOutcome::Empty) => {}
                    Err(e) => {
                        warn!("failed to fetch stats for {}: {e:#}", member.name);
                        report.record_failure(format!("stats of {}", member.name), format!("{e:#}"));
                    }
                }
            }
        }

        info!(
            "refresh complete: {} teams, {} players, {} sheets fetched, {} skipped, {} failures",
            report.teams_synced,
            report.players_synced,
            report.sheets_fetched,
            report.sheets_skipped,
            report.failures.len()
        );
        Ok(report)
    }

    /// Refresh one player's stats sheet. Returns the player row as it
    /// stands afterwards, or `None` when the player is unknown locally.
    ///
    /// With a populated bag and no `force`, the expensive fetch is
    /// skipped entirely.
    pub async fn refresh_player_stats(
        &self,
        player_id: i64,
        force: bool,
    ) -> Result<Option<Player>> {
        let Some(player) = self.player_repo.find_by_id(player_id).await? else {
            return Ok(None);
        };

        if player.has_stats() && !force {
            return Ok(Some(player));
        }

        self.sync_player_sheet(player.id, &player.name, force)
            .await?;
        self.player_repo.find_by_id(player_id).await
    }

    async fn sync_player_sheet(
        &self,
        player_id: i64,
        player_name: &str,
        force: bool,
    ) -> Result<SheetOutcome> {
        if !force {
            if let Some(existing) = self.player_repo.find_by_id(player_id).await? {
                if existing.has_stats() {
                    return Ok(SheetOutcome::Skipped);
                }
            }
        }

        let sheet = self.stats.collect_player_sheet(player_id, player_name).await?;
        if sheet.stats.is_empty() {
            warn!("stats sheet for {} came back empty", player_name);
            return Ok(SheetOutcome::Empty);
        }

        self.player_repo
            .write_stats(player_id, &sheet.stats, force)
            .await?;
        Ok(SheetOutcome::Fetched)
    }
}

enum SheetOutcome {
    Fetched,
    Skipped,
    Empty,
}
