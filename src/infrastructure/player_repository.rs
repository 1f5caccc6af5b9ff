//! sqlx implementation of the player repository
//!
//! The stats column is the durable cache at the heart of the system:
//! roster upserts never touch it, and `write_stats` is a conditional
//! update so a populated bag survives both repeated syncs and racing
//! writers unless the caller explicitly forces the overwrite.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tracing::warn;

use crate::domain::entities::{Player, SquadMember, StatsBag};
use crate::domain::repositories::PlayerRepository;

#[derive(Clone)]
pub struct SqlitePlayerRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePlayerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

const PLAYER_COLUMNS: &str =
    "id, team_id, name, position, nationality, image, flag_image, stats, created_at, updated_at";

fn row_to_player(row: &SqliteRow) -> Player {
    Player {
        id: row.get("id"),
        team_id: row.get("team_id"),
        name: row.get("name"),
        position: row.get("position"),
        nationality: row.get("nationality"),
        image: row.get("image"),
        flag_image: row.get("flag_image"),
        stats: parse_stats(row.get::<Option<String>, _>("stats")),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}

fn parse_stats(raw: Option<String>) -> StatsBag {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return StatsBag::new();
    };
    match serde_json::from_str(&raw) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("discarding unreadable stats payload: {}", e);
            StatsBag::new()
        }
    }
}

#[async_trait]
impl PlayerRepository for SqlitePlayerRepository {
    async fn upsert_roster_entry(&self, team_id: i64, member: &SquadMember) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO players
                (id, team_id, name, position, nationality, image, flag_image, stats, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                team_id = excluded.team_id,
                name = excluded.name,
                position = excluded.position,
                nationality = excluded.nationality,
                image = excluded.image,
                flag_image = excluded.flag_image,
                updated_at = excluded.updated_at
            ",
        )
        .bind(member.id)
        .bind(team_id)
        .bind(&member.name)
        .bind(&member.position)
        .bind(&member.nationality)
        .bind(&member.image)
        .bind(&member.flag_image)
        .bind(now)
        .bind(now)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, player_id: i64) -> Result<Option<Player>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(player_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_player))
    }

    async fn find_by_team(&self, team_id: i64) -> Result<Vec<Player>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ? ORDER BY name");
        let rows = sqlx::query(&sql)
            .bind(team_id)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(row_to_player).collect())
    }

    async fn search_by_name(&self, query: &str) -> Result<Vec<Player>> {
        let sql = format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE name LIKE ? COLLATE NOCASE ORDER BY name"
        );
        let rows = sqlx::query(&sql)
            .bind(format!("%{}%", query.trim()))
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(row_to_player).collect())
    }

    async fn write_stats(&self, player_id: i64, stats: &StatsBag, force: bool) -> Result<bool> {
        let payload = serde_json::to_string(stats)?;
        let now = Utc::now();

        // The guard clause is what makes a populated bag durable even
        // when batch and request handlers race on the same row.
        let sql = if force {
            "UPDATE players SET stats = ?, updated_at = ? WHERE id = ?"
        } else {
            "UPDATE players SET stats = ?, updated_at = ? \
             WHERE id = ? AND (stats IS NULL OR stats = '' OR stats = '{}')"
        };

        let result = sqlx::query(sql)
            .bind(payload)
            .bind(now)
            .bind(player_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u32> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM players")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_stats_payload_degrades_to_empty_bag() {
        assert!(parse_stats(Some("not json".into())).is_empty());
        assert!(parse_stats(Some(String::new())).is_empty());
        assert!(parse_stats(None).is_empty());

        let bag = parse_stats(Some(r#"{"goals":"12"}"#.into()));
        assert_eq!(bag.get("goals").map(String::as_str), Some("12"));
    }
}
