//! Production collector implementations
//!
//! Wires the fetchers and the field extractor into the domain collector
//! traits. The club index and squad pages are client-side rendered and
//! go through the headless browser; player stats pages are
//! server-rendered and use the plain HTTP client.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use scraper::Html;

use crate::domain::entities::{PlayerSheet, SquadMember, TeamListing, name_slug};
use crate::domain::services::{PlayerStatsCollector, SquadCollector, TeamListCollector};
use crate::infrastructure::browser_client::BrowserClient;
use crate::infrastructure::html_parser::LeagueDataExtractor;
use crate::infrastructure::http_client::HttpClient;

/// Collector against the live league site.
pub struct SiteCollector {
    browser: Arc<BrowserClient>,
    http: Arc<HttpClient>,
    extractor: LeagueDataExtractor,
    base_url: String,
}

impl SiteCollector {
    pub fn new(
        browser: Arc<BrowserClient>,
        http: Arc<HttpClient>,
        extractor: LeagueDataExtractor,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            browser,
            http,
            extractor,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn clubs_url(&self) -> String {
        format!("{}/clubs", self.base_url)
    }

    fn squad_url(&self, team: &TeamListing) -> String {
        format!("{}/clubs/{}/{}/squad", self.base_url, team.id, team.slug)
    }

    fn stats_url(&self, player_id: i64, player_name: &str) -> String {
        format!(
            "{}/players/{}/{}/stats",
            self.base_url,
            player_id,
            name_slug(player_name)
        )
    }
}

#[async_trait]
impl TeamListCollector for SiteCollector {
    async fn collect_team_list(&self) -> Result<Vec<TeamListing>> {
        let rendered = self
            .browser
            .fetch_rendered(&self.clubs_url(), self.extractor.team_list_marker())
            .await?;
        let document = Html::parse_document(&rendered);
        Ok(self.extractor.extract_team_cards(&document)?)
    }
}

#[async_trait]
impl SquadCollector for SiteCollector {
    async fn collect_squad(&self, team: &TeamListing) -> Result<Vec<SquadMember>> {
        let rendered = self
            .browser
            .fetch_rendered(&self.squad_url(team), self.extractor.squad_marker())
            .await?;
        let document = Html::parse_document(&rendered);
        Ok(self.extractor.extract_squad_cards(&document)?)
    }
}

#[async_trait]
impl PlayerStatsCollector for SiteCollector {
    async fn collect_player_sheet(&self, player_id: i64, player_name: &str) -> Result<PlayerSheet> {
        let markup = self
            .http
            .get_text(&self.stats_url(player_id, player_name))
            .await?;
        let document = Html::parse_document(&markup);
        Ok(self.extractor.extract_player_sheet(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::browser_client::BrowserClientConfig;
    use crate::infrastructure::http_client::HttpClientConfig;

    fn collector() -> SiteCollector {
        SiteCollector::new(
            Arc::new(BrowserClient::new(BrowserClientConfig::default())),
            Arc::new(HttpClient::new(HttpClientConfig::default()).unwrap()),
            LeagueDataExtractor::new().unwrap(),
            "https://league.example/",
        )
    }

    #[test]
    fn urls_follow_site_layout() {
        let collector = collector();
        assert_eq!(collector.clubs_url(), "https://league.example/clubs");

        let team = TeamListing::new(12, "manchester-united", None);
        assert_eq!(
            collector.squad_url(&team),
            "https://league.example/clubs/12/manchester-united/squad"
        );
        assert_eq!(
            collector.stats_url(4916, "Bukayo Saka"),
            "https://league.example/players/4916/bukayo-saka/stats"
        );
    }
}
