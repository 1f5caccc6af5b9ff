// Database connection and pool management
// SQLite via sqlx; schema is bootstrapped in place, no migration files.

use std::path::Path;

use anyhow::Result;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(database_url: &str) -> Result<Self> {
        let db_path = database_url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");

        // In-memory databases have no file to bootstrap. File-backed ones
        // need the file to exist before the pool connects.
        if db_path != ":memory:" && !db_path.is_empty() {
            if let Some(parent) = Path::new(db_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            if !Path::new(db_path).exists() {
                std::fs::File::create(db_path)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<()> {
        let create_teams_sql = r#"
            CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                crest TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;

        // Player ids are unique upstream, so id alone is the key and a
        // transfer is an update of team_id rather than a new row.
        let create_players_sql = r#"
            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY,
                team_id INTEGER NOT NULL REFERENCES teams (id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                position TEXT,
                nationality TEXT,
                image TEXT,
                flag_image TEXT,
                stats TEXT,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;

        let create_indexes_sql = r#"
            CREATE INDEX IF NOT EXISTS idx_players_team_id ON players (team_id);
            CREATE INDEX IF NOT EXISTS idx_players_name ON players (name)
        "#;

        sqlx::query(create_teams_sql).execute(&self.pool).await?;
        sqlx::query(create_players_sql).execute(&self.pool).await?;
        for statement in create_indexes_sql.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement).execute(&self.pool).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn connects_and_migrates_file_backed_database() -> Result<()> {
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite:{}", db_path.display());

        let db = DatabaseConnection::new(&database_url).await?;
        db.migrate().await?;

        let table = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'players'",
        )
        .fetch_optional(db.pool())
        .await?;
        assert!(table.is_some());

        // migrate is idempotent
        db.migrate().await?;
        Ok(())
    }
}
