//! HTML parsing and field extraction for league site pages
//!
//! Locates named fields by CSS class or attribute and collects them into
//! flat extraction records. Selectors live in one configuration struct so
//! that a site markup revision is a localized change. Per-element misses
//! are logged and degrade to absent fields; they never abort extraction
//! of sibling elements.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{PlayerSheet, SquadMember, StatsBag, TeamListing};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// CSS selectors for the club index, squad and player stats pages.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    pub team_list: TeamListSelectors,
    pub squad: SquadSelectors,
    pub player: PlayerSheetSelectors,
}

#[derive(Debug, Clone)]
pub struct TeamListSelectors {
    /// Container that signals the club index has rendered.
    pub container: String,
    /// One card per club.
    pub card: String,
    /// Link carrying the club id and name slug in its path.
    pub card_link: String,
    /// Crest image inside the card.
    pub card_image: String,
    /// League size; cards beyond this are footer noise on the page.
    pub team_limit: usize,
}

#[derive(Debug, Clone)]
pub struct SquadSelectors {
    /// One stats card per squad member; also the render marker.
    pub card: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    /// Flag icon; its alt text is the nationality.
    pub flag: String,
    pub portrait: String,
}

#[derive(Debug, Clone)]
pub struct PlayerSheetSelectors {
    /// Header with the player display name.
    pub name: String,
    /// Top-level summary stat containers (appearances, goals, wins, losses).
    pub summary: String,
    /// One block per stat category (Discipline, Attack, ...).
    pub category_block: String,
    /// Category title inside a block.
    pub category_title: String,
    /// Stat value spans; the stat name rides in the `data-stat` attribute.
    pub stat_value: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            team_list: TeamListSelectors {
                container: "div.clubIndex".to_string(),
                card: ".club-card-wrapper".to_string(),
                card_link: "a".to_string(),
                card_image: "img".to_string(),
                team_limit: 20,
            },
            squad: SquadSelectors {
                card: ".stats-card".to_string(),
                first_name: ".stats-card__player-first".to_string(),
                last_name: ".stats-card__player-last".to_string(),
                position: ".stats-card__player-position".to_string(),
                flag: ".stats-card__flag-icon".to_string(),
                portrait: "img.statCardImg".to_string(),
            },
            player: PlayerSheetSelectors {
                name: "div.playerDetails h1".to_string(),
                summary: "div.topStat span.allStatContainer".to_string(),
                category_block: "div.statsListBlock".to_string(),
                category_title: ".headerStat".to_string(),
                stat_value: "span.allStatContainer".to_string(),
            },
        }
    }
}

/// Attribute carrying the numeric player id on a squad card.
const PLAYER_ID_ATTR: &str = "data-player-id";
/// Attribute carrying the stat name on a stat value span.
const STAT_NAME_ATTR: &str = "data-stat";

/// Selector-driven extractor over rendered or fetched league pages.
pub struct LeagueDataExtractor {
    config: SelectorConfig,
    team_card: Selector,
    team_card_link: Selector,
    team_card_image: Selector,
    squad_card: Selector,
    squad_first_name: Selector,
    squad_last_name: Selector,
    squad_position: Selector,
    squad_flag: Selector,
    squad_portrait: Selector,
    player_name: Selector,
    player_summary: Selector,
    player_category_block: Selector,
    player_category_title: Selector,
    player_stat_value: Selector,
}

impl LeagueDataExtractor {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_config(SelectorConfig::default())
    }

    pub fn with_config(config: SelectorConfig) -> ScrapeResult<Self> {
        Ok(Self {
            team_card: compile(&config.team_list.card)?,
            team_card_link: compile(&config.team_list.card_link)?,
            team_card_image: compile(&config.team_list.card_image)?,
            squad_card: compile(&config.squad.card)?,
            squad_first_name: compile(&config.squad.first_name)?,
            squad_last_name: compile(&config.squad.last_name)?,
            squad_position: compile(&config.squad.position)?,
            squad_flag: compile(&config.squad.flag)?,
            squad_portrait: compile(&config.squad.portrait)?,
            player_name: compile(&config.player.name)?,
            player_summary: compile(&config.player.summary)?,
            player_category_block: compile(&config.player.category_block)?,
            player_category_title: compile(&config.player.category_title)?,
            player_stat_value: compile(&config.player.stat_value)?,
            config,
        })
    }

    /// Marker selector the DOM fetcher should wait for on the club index.
    pub fn team_list_marker(&self) -> &str {
        &self.config.team_list.container
    }

    /// Marker selector the DOM fetcher should wait for on a squad page.
    pub fn squad_marker(&self) -> &str {
        &self.config.squad.card
    }

    /// Extract team cards from the rendered club index page.
    ///
    /// Fails with `ExtractionMiss` when no cards are present at all (the
    /// page did not render); individual malformed cards are skipped.
    pub fn extract_team_cards(&self, html: &Html) -> ScrapeResult<Vec<TeamListing>> {
        let mut listings = Vec::new();

        for card in html
            .select(&self.team_card)
            .take(self.config.team_list.team_limit)
        {
            match self.extract_single_team_card(&card) {
                Some(listing) => listings.push(listing),
                None => warn!("skipping malformed team card"),
            }
        }

        if listings.is_empty() {
            return Err(ScrapeError::extraction_miss(&self.config.team_list.card));
        }

        debug!("extracted {} team cards", listings.len());
        Ok(listings)
    }

    fn extract_single_team_card(&self, card: &ElementRef) -> Option<TeamListing> {
        let href = card
            .select(&self.team_card_link)
            .find_map(|link| link.value().attr("href"))?;
        let (id, slug) = parse_club_href(href)?;

        let crest = card
            .select(&self.team_card_image)
            .next()
            .and_then(|img| crest_from_image(&img));

        Some(TeamListing::new(id, slug, crest))
    }

    /// Extract squad member cards from a rendered squad page.
    ///
    /// A card missing its player id or name is logged and skipped;
    /// sibling cards are unaffected.
    pub fn extract_squad_cards(&self, html: &Html) -> ScrapeResult<Vec<SquadMember>> {
        let cards: Vec<ElementRef> = html.select(&self.squad_card).collect();
        if cards.is_empty() {
            return Err(ScrapeError::extraction_miss(&self.config.squad.card));
        }

        let mut members = Vec::new();
        for card in &cards {
            match self.extract_single_squad_card(card) {
                Some(member) => members.push(member),
                None => warn!("skipping squad card with missing id or name"),
            }
        }

        debug!("extracted {} of {} squad cards", members.len(), cards.len());
        Ok(members)
    }

    fn extract_single_squad_card(&self, card: &ElementRef) -> Option<SquadMember> {
        let id: i64 = card.value().attr(PLAYER_ID_ATTR)?.trim().parse().ok()?;

        let first = element_text(card, &self.squad_first_name)?;
        let last = element_text(card, &self.squad_last_name)?;

        Some(SquadMember {
            id,
            name: format!("{first} {last}"),
            position: element_text(card, &self.squad_position),
            nationality: card
                .select(&self.squad_flag)
                .next()
                .and_then(|flag| flag.value().attr("alt"))
                .map(|alt| alt.trim().to_string())
                .filter(|alt| !alt.is_empty()),
            image: element_attr(card, &self.squad_portrait, "src"),
            flag_image: element_attr(card, &self.squad_flag, "src"),
        })
    }

    /// Extract the stats sheet from a player detail page.
    ///
    /// Top-level summary stats and per-category stats are flattened into
    /// one ordered bag; category entries are keyed "Category - StatName".
    /// The stat vocabulary is discovered from the page, never assumed:
    /// goalkeepers and outfield players carry different categories.
    pub fn extract_player_sheet(&self, html: &Html) -> ScrapeResult<PlayerSheet> {
        let name = document_text(html, &self.player_name);
        let mut stats = StatsBag::new();

        for span in html.select(&self.player_summary) {
            if let Some((stat, value)) = stat_entry(&span) {
                stats.insert(stat, value);
            }
        }

        for block in html.select(&self.player_category_block) {
            let category = element_text(&block, &self.player_category_title);
            for span in block.select(&self.player_stat_value) {
                let Some((stat, value)) = stat_entry(&span) else {
                    continue;
                };
                let key = match &category {
                    Some(category) => format!("{category} - {stat}"),
                    None => stat,
                };
                stats.insert(key, value);
            }
        }

        if name.is_none() && stats.is_empty() {
            return Err(ScrapeError::extraction_miss(&self.config.player.name));
        }

        debug!("extracted player sheet with {} stats", stats.len());
        Ok(PlayerSheet { name, stats })
    }
}

fn compile(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::invalid_selector(selector, e))
}

/// First non-empty text match under `element`.
fn element_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// First non-empty attribute match under `element`.
fn element_attr(element: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn document_text(html: &Html, selector: &Selector) -> Option<String> {
    html.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// (stat name, value) from a stat value span, keyed by its data attribute.
fn stat_entry(span: &ElementRef) -> Option<(String, String)> {
    let stat = span.value().attr(STAT_NAME_ATTR)?.trim().to_string();
    if stat.is_empty() {
        return None;
    }
    let value = span.text().collect::<String>().trim().to_string();
    Some((stat, value))
}

/// Pull `(id, slug)` out of a club link: `.../clubs/{id}/{slug}[/...]`.
/// Handles both absolute and site-relative hrefs.
fn parse_club_href(href: &str) -> Option<(i64, String)> {
    let path: Vec<String> = if let Ok(url) = Url::parse(href) {
        url.path_segments()?.map(|s| s.to_string()).collect()
    } else {
        href.trim_matches('/').split('/').map(|s| s.to_string()).collect()
    };

    let clubs_at = path.iter().position(|segment| segment == "clubs")?;
    let id: i64 = path.get(clubs_at + 1)?.parse().ok()?;
    let slug = path.get(clubs_at + 2)?.clone();
    if slug.is_empty() {
        return None;
    }
    Some((id, slug))
}

/// Crest URL from a card image: last `srcset` candidate (the largest
/// rendition), falling back to `src`.
fn crest_from_image(img: &ElementRef) -> Option<String> {
    if let Some(srcset) = img.value().attr("srcset") {
        if let Some(candidate) = srcset.split(',').next_back() {
            if let Some(url) = candidate.split_whitespace().next() {
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
    }
    img.value()
        .attr("src")
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> LeagueDataExtractor {
        LeagueDataExtractor::new().unwrap()
    }

    #[test]
    fn club_href_parsing() {
        assert_eq!(
            parse_club_href("https://example.com/clubs/10/liverpool/overview"),
            Some((10, "liverpool".to_string()))
        );
        assert_eq!(
            parse_club_href("/clubs/12/manchester-united"),
            Some((12, "manchester-united".to_string()))
        );
        assert_eq!(parse_club_href("/players/555/someone"), None);
        assert_eq!(parse_club_href("/clubs/not-a-number/x"), None);
    }

    #[test]
    fn team_card_extraction_reads_slug_and_srcset() {
        let html = Html::parse_document(
            r#"
            <div class="clubIndex col-12">
                <div class="club-card-wrapper">
                    <a href="/clubs/1/arsenal/overview"></a>
                    <img srcset="/crests/t3-small.png 100w, /crests/t3.png 200w">
                </div>
                <div class="club-card-wrapper">
                    <a href="/clubs/4/aston-villa/overview"></a>
                    <img src="/crests/t7.png">
                </div>
            </div>
            "#,
        );

        let listings = extractor().extract_team_cards(&html).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, 1);
        assert_eq!(listings[0].name, "arsenal");
        assert_eq!(listings[0].crest.as_deref(), Some("/crests/t3.png"));
        assert_eq!(listings[1].name, "aston villa");
        assert_eq!(listings[1].slug, "aston-villa");
        assert_eq!(listings[1].crest.as_deref(), Some("/crests/t7.png"));
    }

    #[test]
    fn team_card_extraction_caps_at_league_size() {
        let cards: String = (1..=25)
            .map(|i| {
                format!(
                    r#"<div class="club-card-wrapper"><a href="/clubs/{i}/team-{i}"></a></div>"#
                )
            })
            .collect();
        let html = Html::parse_document(&format!(r#"<div class="clubIndex">{cards}</div>"#));

        let listings = extractor().extract_team_cards(&html).unwrap();
        assert_eq!(listings.len(), 20);
    }

    #[test]
    fn empty_club_index_is_an_extraction_miss() {
        let html = Html::parse_document("<div class='clubIndex'></div>");
        let err = extractor().extract_team_cards(&html).unwrap_err();
        assert!(matches!(err, ScrapeError::ExtractionMiss { .. }));
    }

    #[test]
    fn squad_extraction_skips_broken_card_and_keeps_siblings() {
        let html = Html::parse_document(
            r#"
            <div>
                <div class="stats-card" data-player-id="101">
                    <div class="stats-card__player-first">Bukayo</div>
                    <div class="stats-card__player-last">Saka</div>
                    <div class="stats-card__player-position">Forward</div>
                    <img class="stats-card__flag-icon" alt="England" src="/flags/eng.png">
                    <img class="statCardImg" src="/photos/101.png">
                </div>
                <div class="stats-card">
                    <div class="stats-card__player-first">Missing</div>
                    <div class="stats-card__player-last">Id</div>
                </div>
                <div class="stats-card" data-player-id="103">
                    <div class="stats-card__player-first">David</div>
                    <div class="stats-card__player-last">Raya</div>
                    <div class="stats-card__player-position">Goalkeeper</div>
                    <img class="stats-card__flag-icon" alt="Spain" src="/flags/esp.png">
                </div>
            </div>
            "#,
        );

        let members = extractor().extract_squad_cards(&html).unwrap();
        assert_eq!(members.len(), 2);

        assert_eq!(members[0].id, 101);
        assert_eq!(members[0].name, "Bukayo Saka");
        assert_eq!(members[0].position.as_deref(), Some("Forward"));
        assert_eq!(members[0].nationality.as_deref(), Some("England"));
        assert_eq!(members[0].image.as_deref(), Some("/photos/101.png"));
        assert_eq!(members[0].flag_image.as_deref(), Some("/flags/eng.png"));

        assert_eq!(members[1].id, 103);
        assert_eq!(members[1].nationality.as_deref(), Some("Spain"));
        assert_eq!(members[1].image, None);
    }

    #[test]
    fn player_sheet_flattens_categories_and_merges_summary() {
        let html = Html::parse_document(
            r#"
            <div class="playerDetails"><h1>David Raya</h1></div>
            <div class="topStat">
                Appearances <span class="allStatContainer" data-stat="appearances">38</span>
            </div>
            <div class="topStat">
                Wins <span class="allStatContainer" data-stat="wins">24</span>
            </div>
            <div class="statsListBlock">
                <div class="headerStat">Goalkeeping</div>
                <span class="allStatContainer" data-stat="saves">112</span>
                <span class="allStatContainer" data-stat="clean_sheet">16</span>
            </div>
            <div class="statsListBlock">
                <div class="headerStat">Discipline</div>
                <span class="allStatContainer" data-stat="yellow_card">2</span>
            </div>
            "#,
        );

        let sheet = extractor().extract_player_sheet(&html).unwrap();
        assert_eq!(sheet.name.as_deref(), Some("David Raya"));
        assert_eq!(sheet.stats.get("appearances").map(String::as_str), Some("38"));
        assert_eq!(sheet.stats.get("wins").map(String::as_str), Some("24"));
        assert_eq!(
            sheet.stats.get("Goalkeeping - saves").map(String::as_str),
            Some("112")
        );
        assert_eq!(
            sheet.stats.get("Discipline - yellow_card").map(String::as_str),
            Some("2")
        );
        assert_eq!(sheet.stats.len(), 5);
    }

    #[test]
    fn blank_player_page_is_an_extraction_miss() {
        let html = Html::parse_document("<html><body></body></html>");
        let err = extractor().extract_player_sheet(&html).unwrap_err();
        assert!(matches!(err, ScrapeError::ExtractionMiss { .. }));
    }
}
