//! Integration tests for the read-side query boundary.

use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use squadstats::application::queries::{QueryError, StatsQueries};
use squadstats::domain::entities::{SquadMember, TeamListing};
use squadstats::domain::repositories::{PlayerRepository, TeamRepository};
use squadstats::infrastructure::{DatabaseConnection, SqlitePlayerRepository, SqliteTeamRepository};

async fn seeded_queries() -> Result<(StatsQueries, TempDir)> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.path().join("test.db").display());
    let db = DatabaseConnection::new(&url).await?;
    db.migrate().await?;
    let pool = Arc::new(db.pool().clone());

    let teams = Arc::new(SqliteTeamRepository::new(pool.clone()));
    let players = Arc::new(SqlitePlayerRepository::new(pool));

    teams
        .upsert(&TeamListing::new(1, "arsenal", Some("/c/1.png".into())))
        .await?;
    teams.upsert(&TeamListing::new(2, "chelsea", None)).await?;

    for (id, name) in [(11, "Bukayo Saka"), (12, "David Raya")] {
        players
            .upsert_roster_entry(
                1,
                &SquadMember {
                    id,
                    name: name.to_string(),
                    position: None,
                    nationality: Some("England".to_string()),
                    image: None,
                    flag_image: None,
                },
            )
            .await?;
    }

    Ok((StatsQueries::new(teams, players), dir))
}

#[tokio::test]
async fn list_teams_returns_all_ordered_by_name() -> Result<()> {
    let (queries, _dir) = seeded_queries().await?;
    let teams = queries.list_teams().await.unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].name, "arsenal");
    assert_eq!(teams[1].name, "chelsea");
    Ok(())
}

#[tokio::test]
async fn team_detail_includes_squad() -> Result<()> {
    let (queries, _dir) = seeded_queries().await?;
    let detail = queries.team_detail(1).await.unwrap();
    assert_eq!(detail.team.crest.as_deref(), Some("/c/1.png"));
    assert_eq!(detail.squad.len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_entities_signal_404() -> Result<()> {
    let (queries, _dir) = seeded_queries().await?;

    let err = queries.team_detail(99).await.unwrap_err();
    assert!(matches!(err, QueryError::NotFound));
    assert_eq!(err.status_code(), 404);

    let err = queries.player_detail(999).await.unwrap_err();
    assert_eq!(err.status_code(), 404);
    Ok(())
}

#[tokio::test]
async fn player_search_is_case_insensitive_substring() -> Result<()> {
    let (queries, _dir) = seeded_queries().await?;

    let hits = queries.search_players("saka").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Bukayo Saka");

    let hits = queries.search_players("RAYA").await.unwrap();
    assert_eq!(hits.len(), 1);

    let hits = queries.search_players("nobody").await.unwrap();
    assert!(hits.is_empty());
    Ok(())
}
