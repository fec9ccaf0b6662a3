//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures and fatal aborts only. Normal
//! terminations (goal reached, no plan, budget exhausted, cancelled) are
//! [`SearchOutcome`](crate::search::SearchOutcome) variants inside `Ok`.

use graft_kernel::proof::canon::CanonError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The policy or its configuration source is unusable.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The initial state, or a successor produced during search, violates a
    /// structural invariant, or a predicate failed outside a bound check.
    #[error("malformed state: {detail}")]
    MalformedState { detail: String },

    /// Canonical serialization of an audit artifact failed.
    #[error(transparent)]
    Canon(#[from] CanonError),
}
