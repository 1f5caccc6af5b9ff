//! Domain module - Core business logic and entities
//!
//! Entities, extracted-record value types, repository traits, and the
//! collector service traits the orchestrator depends on.

pub mod entities;
pub mod repositories;
pub mod services;

// Re-export commonly used items for convenience
pub use entities::{Player, PlayerSheet, SquadMember, StatsBag, Team, TeamListing};
