//! Gig Matcher - ranks gig workers for a task with a language model
//!
//! One request reads every worker profile from PostgreSQL, composes a
//! deterministic ranking prompt, asks a text-completion oracle for an
//! ordering and returns the normalized answer.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{compose_prompt, normalize, RequestHandler};
pub use models::{ProfileRecord, RankingOutcome, RankRequest, RankResponse, NO_MATCH_SENTINEL};
pub use services::{CompletionClient, PgConnector, ProfileStore, RankingOracle, StoreError};
