//! Response DTOs for the request/response boundary
//!
//! Plain serializable records; rendering/templating happens outside the
//! core.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Player, StatsBag, Team};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
    pub crest: Option<String>,
}

impl From<Team> for TeamDto {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            crest: team.crest,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub flag_image: Option<String>,
    pub stats: StatsBag,
}

impl From<Player> for PlayerDto {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            team_id: player.team_id,
            name: player.name,
            position: player.position,
            nationality: player.nationality,
            image: player.image,
            flag_image: player.flag_image,
            stats: player.stats,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDetailDto {
    pub team: TeamDto,
    pub squad: Vec<PlayerDto>,
}
