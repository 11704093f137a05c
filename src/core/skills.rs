use crate::models::RawSkills;
use thiserror::Error;

/// Skills text that is not a JSON list of strings
#[derive(Debug, Error)]
#[error("Invalid skills encoding {raw:?}: {source}")]
pub struct SkillsDecodeError {
    pub raw: String,
    #[source]
    pub source: serde_json::Error,
}

/// Decode a stored skills value into an ordered list of tags
///
/// Native lists pass through untouched, so decoding is idempotent. Text is
/// parsed as a JSON array; blank text means no skills.
pub fn decode_skills(raw: RawSkills) -> Result<Vec<String>, SkillsDecodeError> {
    match raw {
        RawSkills::List(skills) => Ok(skills),
        RawSkills::Text(text) => {
            if text.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_json::from_str::<Vec<String>>(&text)
                .map_err(|source| SkillsDecodeError { raw: text, source })
        }
    }
}
