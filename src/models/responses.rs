use serde::{Deserialize, Serialize};
use crate::models::domain::{OracleErrorKind, OutcomeStatus, RankingOutcome};

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub result: String,
    pub outcome: OutcomeStatus,
    #[serde(rename = "errorKind", skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<OracleErrorKind>,
}

impl From<&RankingOutcome> for RankResponse {
    fn from(outcome: &RankingOutcome) -> Self {
        let error_kind = match outcome {
            RankingOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        };

        Self {
            result: outcome.text(),
            outcome: outcome.status(),
            error_kind,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
