//! Core entities for league squad and statistics data
//!
//! `Team` and `Player` are the persisted entities; `TeamListing`,
//! `SquadMember` and `PlayerSheet` are point-in-time extraction records
//! produced by the scrapers before reconciliation against the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open-ended set of named statistics for one player.
///
/// The label set varies by playing position (goalkeepers carry different
/// categories than outfield players) and by site markup revision, so this
/// stays an ordered label -> value mapping rather than a fixed struct.
pub type StatsBag = BTreeMap<String, String>;

/// A club, keyed by the site's stable numeric id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub crest: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A squad member, keyed by the site's numeric player id.
///
/// The player id is unique upstream, so a transfer reassigns `team_id`
/// on the existing row instead of creating a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub flag_image: Option<String>,
    pub stats: StatsBag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// A player with a populated stats bag counts as fully synchronized;
    /// the refresh pipeline skips the expensive detail fetch for them.
    pub fn has_stats(&self) -> bool {
        !self.stats.is_empty()
    }
}

/// One team card extracted from the club index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamListing {
    pub id: i64,
    /// Display name, derived from the URL slug with hyphens replaced.
    pub name: String,
    /// Original URL slug, needed to build the squad page URL.
    pub slug: String,
    pub crest: Option<String>,
}

impl TeamListing {
    pub fn new(id: i64, slug: impl Into<String>, crest: Option<String>) -> Self {
        let slug = slug.into();
        Self {
            id,
            name: slug.replace('-', " "),
            slug,
            crest,
        }
    }
}

/// One player card extracted from a squad page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadMember {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub image: Option<String>,
    pub flag_image: Option<String>,
}

/// Stats sheet extracted from a player detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSheet {
    /// Display name as rendered on the detail page header.
    pub name: Option<String>,
    /// Flattened stats: top-level summary entries plus per-category
    /// entries keyed as "Category - StatName".
    pub stats: StatsBag,
}

/// URL slug for a display name ("Erling Haaland" -> "erling-haaland").
pub fn name_slug(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_name_replaces_hyphens() {
        let listing = TeamListing::new(11, "aston-villa", None);
        assert_eq!(listing.name, "aston villa");
        assert_eq!(listing.slug, "aston-villa");
    }

    #[test]
    fn name_slug_lowercases_and_hyphenates() {
        assert_eq!(name_slug("Erling Haaland"), "erling-haaland");
        assert_eq!(name_slug("  Son Heung-Min "), "son-heung-min");
    }
}
