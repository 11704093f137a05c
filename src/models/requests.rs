use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank workers for a task
///
/// An empty task is accepted; the oracle is still asked.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(max = 4000))]
    #[serde(default, alias = "task_description", alias = "taskDescription")]
    pub task: String,
}
