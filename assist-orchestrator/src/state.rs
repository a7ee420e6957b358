use serde::{Deserialize, Serialize};

/// Pipeline stages, in execution order.
///
/// `Blocked` and `Completed` are terminal. A request visits each stage
/// sequentially; there is no ordering between concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Validating,
    Enriching,
    PreChecking,
    Blocked,
    Retrieving,
    Generating,
    PostChecking,
    Logging,
    Completed,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineState::Validating => "validating",
            PipelineState::Enriching => "enriching",
            PipelineState::PreChecking => "pre_checking",
            PipelineState::Blocked => "blocked",
            PipelineState::Retrieving => "retrieving",
            PipelineState::Generating => "generating",
            PipelineState::PostChecking => "post_checking",
            PipelineState::Logging => "logging",
            PipelineState::Completed => "completed",
        };
        f.write_str(name)
    }
}
