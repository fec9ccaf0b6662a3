//! Diff-layer errors.

use graft_kernel::carrier::error::StateError;
use graft_search::action::ActionError;
use graft_search::error::SearchError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// Policy config, or the entity sequences handed in, are unusable.
    #[error("invalid diff input: {detail}")]
    InvalidInput { detail: String },

    #[error(transparent)]
    Search(#[from] SearchError),

    /// Replaying the found plan failed. The planner only returns replayable
    /// plans, so this indicates a vocabulary bug.
    #[error("plan replay failed: {0}")]
    Replay(#[from] ActionError),

    #[error(transparent)]
    State(#[from] StateError),

    /// An edit script does not fit the sequence it is applied to.
    #[error("edit op {op_index} does not fit: {detail}")]
    ScriptMismatch { op_index: usize, detail: String },
}
