//! sqlx implementation of the team repository

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::domain::entities::{Team, TeamListing};
use crate::domain::repositories::TeamRepository;

#[derive(Clone)]
pub struct SqliteTeamRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteTeamRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

fn row_to_team(row: &SqliteRow) -> Team {
    Team {
        id: row.get("id"),
        name: row.get("name"),
        crest: row.get("crest"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn upsert(&self, listing: &TeamListing) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO teams (id, name, crest, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                crest = excluded.crest,
                updated_at = excluded.updated_at
            ",
        )
        .bind(listing.id)
        .bind(&listing.name)
        .bind(&listing.crest)
        .bind(now)
        .bind(now)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        let row = sqlx::query("SELECT id, name, crest, created_at, updated_at FROM teams WHERE id = ?")
            .bind(team_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_team))
    }

    async fn find_all(&self) -> Result<Vec<Team>> {
        let rows =
            sqlx::query("SELECT id, name, crest, created_at, updated_at FROM teams ORDER BY name")
                .fetch_all(&*self.pool)
                .await?;
        Ok(rows.iter().map(row_to_team).collect())
    }

    async fn count(&self) -> Result<u32> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teams")
            .fetch_one(&*self.pool)
            .await?;
        Ok(count as u32)
    }
}
