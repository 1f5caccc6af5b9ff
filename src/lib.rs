//! squadstats - League squad and player statistics scraping service
//!
//! Scrapes club and player listings from the league website, persists them
//! to SQLite, and exposes query operations over the stored data. The
//! persisted store doubles as a cache of record: once a player's stats
//! sheet is populated it is not re-fetched unless explicitly forced.

pub mod domain;
pub mod application;
pub mod infrastructure;
