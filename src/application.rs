//! Application layer module
//!
//! Use cases that orchestrate the domain logic: the batch refresh
//! pipeline and the read-side query boundary.

pub mod dto;
pub mod queries;
pub mod refresh;

pub use queries::{QueryError, StatsQueries};
pub use refresh::{RefreshEngine, RefreshReport};
