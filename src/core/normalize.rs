use crate::models::{RankingOutcome, NO_MATCH_SENTINEL};
use crate::services::oracle::OracleError;

/// Trim oracle output, substituting the sentinel when nothing is left
pub fn normalize(oracle_output: &str) -> String {
    let trimmed = oracle_output.trim();
    if trimmed.is_empty() {
        NO_MATCH_SENTINEL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Classify an oracle result into a [`RankingOutcome`]
///
/// Text goes through [`normalize`]; the sentinel maps to `NoMatch`.
pub fn into_outcome(result: Result<String, OracleError>) -> RankingOutcome {
    match result {
        Ok(text) => {
            let normalized = normalize(&text);
            if normalized == NO_MATCH_SENTINEL {
                RankingOutcome::NoMatch
            } else {
                RankingOutcome::Ranked(normalized)
            }
        }
        Err(e) => RankingOutcome::Failed {
            kind: e.kind(),
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OracleErrorKind;

    #[test]
    fn test_blank_becomes_sentinel() {
        assert_eq!(normalize(""), "No match found.");
        assert_eq!(normalize("   "), "No match found.");
        assert_eq!(normalize("\n\t"), "No match found.");
    }

    #[test]
    fn test_trims_only() {
        assert_eq!(normalize("  Alice, Bob  "), "Alice, Bob");
        assert_eq!(normalize("\n1. Alice\n2. Bob\n"), "1. Alice\n2. Bob");
    }

    #[test]
    fn test_outcome_from_text() {
        assert_eq!(into_outcome(Ok(" \n".to_string())), RankingOutcome::NoMatch);
        assert_eq!(
            into_outcome(Ok("\n\n1. Alice".to_string())),
            RankingOutcome::Ranked("1. Alice".to_string())
        );
    }

    #[test]
    fn test_outcome_text_matches_normalize() {
        for raw in ["", "  ", "  Alice, Bob  ", "\n1. Alice\n2. Bob\n", "No match found."] {
            assert_eq!(into_outcome(Ok(raw.to_string())).text(), normalize(raw));
        }
        assert_eq!(
            into_outcome(Ok(" No match found. ".to_string())),
            RankingOutcome::NoMatch
        );
    }

    #[test]
    fn test_outcome_from_error() {
        let outcome = into_outcome(Err(OracleError::RateLimited("slow down".to_string())));
        match outcome {
            RankingOutcome::Failed { kind, message } => {
                assert_eq!(kind, OracleErrorKind::RateLimited);
                assert!(message.contains("slow down"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
