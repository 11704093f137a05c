// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ProfileRecord, RawProfileRow, RawSkills, RankingOutcome, OutcomeStatus, OracleErrorKind, NO_MATCH_SENTINEL};
pub use requests::RankRequest;
pub use responses::{RankResponse, HealthResponse, ErrorResponse};
