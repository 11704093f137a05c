use crate::core::{normalize::into_outcome, prompt::compose_prompt};
use crate::models::RankingOutcome;
use crate::services::{ProfileStore, RankingOracle, StoreError};
use std::sync::Arc;

/// Default number of candidates embedded in one prompt
pub const DEFAULT_MAX_CANDIDATES: usize = 100;

/// Request orchestrator - runs one ranking pipeline per call
///
/// # Pipeline Stages
/// 1. Fetch all profiles from the store
/// 2. Cap the candidate list
/// 3. Compose the prompt
/// 4. Ask the oracle
/// 5. Normalize the answer
///
/// Store failures end the request. Oracle failures come back as
/// [`RankingOutcome::Failed`] so the caller always has something to show.
#[derive(Clone)]
pub struct RequestHandler {
    store: ProfileStore,
    oracle: Arc<dyn RankingOracle>,
    max_candidates: Option<usize>,
}

impl RequestHandler {
    pub fn new(
        store: ProfileStore,
        oracle: Arc<dyn RankingOracle>,
        max_candidates: Option<usize>,
    ) -> Self {
        Self {
            store,
            oracle,
            max_candidates,
        }
    }

    /// Rank the stored workers for a task description
    ///
    /// An empty task or an empty store still produces a prompt and an oracle
    /// call; only a failed fetch short-circuits.
    pub async fn handle_request(&self, task: &str) -> Result<RankingOutcome, StoreError> {
        let mut profiles = self.store.fetch_profiles().await.map_err(|e| {
            tracing::error!("Profile fetch failed, not ranking: {}", e);
            e
        })?;

        if let Some(max) = self.max_candidates {
            if profiles.len() > max {
                tracing::warn!(
                    "Store returned {} profiles, keeping the first {}",
                    profiles.len(),
                    max
                );
                profiles.truncate(max);
            }
        }

        if profiles.is_empty() {
            tracing::warn!("No worker profiles available, submitting prompt without candidates");
        }

        let prompt = compose_prompt(task, &profiles);

        tracing::debug!("Composed prompt for {} candidates:\n{}", profiles.len(), prompt);

        let outcome = into_outcome(self.oracle.rank(&prompt).await);

        match &outcome {
            RankingOutcome::Failed { kind, message } => {
                tracing::warn!("Oracle call failed ({:?}): {}", kind, message);
            }
            other => {
                tracing::info!("Ranked {} candidates: {:?}", profiles.len(), other.status());
            }
        }

        Ok(outcome)
    }
}
