//! Typed failures for state access and mutation.

/// Failure raised by [`EntityList`](crate::carrier::entity_list::EntityList)
/// and [`EditState`](crate::carrier::state::EditState) operations.
///
/// Only the out-of-range kinds are bound checks (see [`StateError::is_bound_check`]).
/// The planner treats a bound check raised by a predicate as "action not
/// applicable here"; every other kind means the state is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// An entity position outside `0..len` was accessed.
    #[error("entity index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A list index outside `0..count` was accessed.
    #[error("list {list} out of range for state with {count} lists")]
    ListOutOfRange { list: usize, count: usize },

    /// The cursor invariant `cursor <= len` does not hold.
    #[error("cursor {cursor} exceeds list length {len}")]
    CursorInvariant { cursor: usize, len: usize },

    /// A state must hold at least one list.
    #[error("edit state holds no entity lists")]
    EmptyState,

    /// An effect reported a domain failure of its own.
    #[error("effect failed: {detail}")]
    EffectFailed { detail: String },
}

impl StateError {
    /// True for the expected bound-check failures (`IndexOutOfRange`, `ListOutOfRange`).
    #[must_use]
    pub const fn is_bound_check(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::ListOutOfRange { .. }
        )
    }
}
