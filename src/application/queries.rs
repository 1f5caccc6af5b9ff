//! Read-side query boundary
//!
//! Invoked with primitive inputs (an id, a search string) and returns
//! plain records, or an error signal carrying an HTTP-equivalent status
//! code: 404 for a missing entity, 500 for an unexpected fault. The 500
//! message stays generic; the detail is logged here and never leaks.

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::application::dto::{PlayerDto, TeamDetailDto, TeamDto};
use crate::domain::repositories::{PlayerRepository, TeamRepository};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("not found")]
    NotFound,
    #[error("internal error")]
    Internal(String),
}

impl QueryError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Internal(_) => 500,
        }
    }
}

impl From<anyhow::Error> for QueryError {
    fn from(e: anyhow::Error) -> Self {
        error!("query failed: {e:#}");
        Self::Internal(format!("{e:#}"))
    }
}

pub struct StatsQueries {
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
}

impl StatsQueries {
    pub fn new(teams: Arc<dyn TeamRepository>, players: Arc<dyn PlayerRepository>) -> Self {
        Self { teams, players }
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamDto>, QueryError> {
        let teams = self.teams.find_all().await?;
        Ok(teams.into_iter().map(TeamDto::from).collect())
    }

    pub async fn team_detail(&self, team_id: i64) -> Result<TeamDetailDto, QueryError> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or(QueryError::NotFound)?;
        let squad = self.players.find_by_team(team_id).await?;

        Ok(TeamDetailDto {
            team: TeamDto::from(team),
            squad: squad.into_iter().map(PlayerDto::from).collect(),
        })
    }

    pub async fn player_detail(&self, player_id: i64) -> Result<PlayerDto, QueryError> {
        let player = self
            .players
            .find_by_id(player_id)
            .await?
            .ok_or(QueryError::NotFound)?;
        Ok(PlayerDto::from(player))
    }

    pub async fn search_players(&self, query: &str) -> Result<Vec<PlayerDto>, QueryError> {
        let players = self.players.search_by_name(query).await?;
        Ok(players.into_iter().map(PlayerDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kinds() {
        assert_eq!(QueryError::NotFound.status_code(), 404);
        assert_eq!(QueryError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn internal_error_display_stays_generic() {
        let err = QueryError::Internal("table players is corrupted".into());
        assert_eq!(err.to_string(), "internal error");
    }
}
