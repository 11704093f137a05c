use serde::{Deserialize, Serialize};

/// Text returned when the oracle produced nothing worth showing
pub const NO_MATCH_SENTINEL: &str = "No match found.";

/// Canonical worker profile, as handed to the prompt composer
///
/// Skills are always an ordered list by the time a record exists; raw store
/// encodings are resolved in [`RawProfileRow::into_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub about: String,
    pub skills: Vec<String>,
    pub rating: f64,
    #[serde(rename = "trustScore")]
    pub trust_score: f64,
    #[serde(rename = "ninjaLevel")]
    pub ninja_level: String,
    #[serde(rename = "taskExperience")]
    pub task_experience: f64,
    pub availability: String,
}

/// Skills column as it comes out of the store
#[derive(Debug, Clone, PartialEq)]
pub enum RawSkills {
    /// JSON-serialized list, e.g. `["plumbing","tiling"]`
    Text(String),
    /// Native array column
    List(Vec<String>),
}

/// One worker row before skills normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawProfileRow {
    pub name: String,
    pub about: Option<String>,
    pub skills: RawSkills,
    pub rating: f64,
    pub trust_score: f64,
    pub ninja_level: String,
    pub task_experience: f64,
    pub availability: String,
}

impl RawProfileRow {
    /// Normalize the row into a [`ProfileRecord`]
    pub fn into_record(self) -> Result<ProfileRecord, crate::core::skills::SkillsDecodeError> {
        let skills = crate::core::skills::decode_skills(self.skills)?;

        Ok(ProfileRecord {
            name: self.name,
            about: self.about.unwrap_or_default(),
            skills,
            rating: self.rating,
            trust_score: self.trust_score,
            ninja_level: self.ninja_level,
            task_experience: self.task_experience,
            availability: self.availability,
        })
    }
}

/// Coarse classification of an oracle failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleErrorKind {
    Transport,
    Unauthorized,
    RateLimited,
    Api,
    MalformedResponse,
}

/// Which branch of [`RankingOutcome`] a response carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ranked,
    NoMatch,
    Error,
}

/// Result of one ranking request
#[derive(Debug, Clone, PartialEq)]
pub enum RankingOutcome {
    /// Ranked listing of profile names, best fit first
    Ranked(String),
    /// Oracle answered with nothing
    NoMatch,
    /// Oracle call failed; the request itself did not
    Failed {
        kind: OracleErrorKind,
        message: String,
    },
}

impl RankingOutcome {
    /// The single display string handed to the front end
    pub fn text(&self) -> String {
        match self {
            RankingOutcome::Ranked(ranking) => ranking.clone(),
            RankingOutcome::NoMatch => NO_MATCH_SENTINEL.to_string(),
            RankingOutcome::Failed { message, .. } => format!("An error occurred: {}", message),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RankingOutcome::Failed { .. })
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            RankingOutcome::Ranked(_) => OutcomeStatus::Ranked,
            RankingOutcome::NoMatch => OutcomeStatus::NoMatch,
            RankingOutcome::Failed { .. } => OutcomeStatus::Error,
        }
    }
}
