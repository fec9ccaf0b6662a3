//! `EditState`: a fixed-size, ordered collection of entity lists.
//!
//! A single-list state models a plain cursor walk; a multi-list state
//! compares lists (e.g. a working list against a reference list). The number
//! of lists is fixed at construction. Only the lists' contents and cursors
//! change afterwards.
//!
//! # Equality semantics
//!
//! Two states are equivalent for search (visited-set dedup, goal-state
//! comparison) when their [`identity_bytes`](EditState::identity_bytes) are
//! equal. `PartialEq` agrees with that: it compares entities and cursors of
//! every list, never storage identity.

use crate::carrier::entity::Entity;
use crate::carrier::entity_list::EntityList;
use crate::carrier::error::StateError;

/// Index of a list within an [`EditState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListId(pub usize);

impl ListId {
    /// The first list; the only one in a single-list state.
    pub const PRIMARY: Self = Self(0);

    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "list#{}", self.0)
    }
}

/// The planner's state: one or more entity lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState<E> {
    lists: Vec<EntityList<E>>,
}

impl<E: Entity> EditState<E> {
    /// Build a state from its lists.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyState`] if `lists` is empty, or the first
    /// list's validation error.
    pub fn new(lists: Vec<EntityList<E>>) -> Result<Self, StateError> {
        if lists.is_empty() {
            return Err(StateError::EmptyState);
        }
        let state = Self { lists };
        state.validate()?;
        Ok(state)
    }

    /// A single-list state.
    #[must_use]
    pub fn single(list: EntityList<E>) -> Self {
        Self { lists: vec![list] }
    }

    /// Number of lists (fixed for the lifetime of the state).
    #[must_use]
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// All lists in order.
    #[must_use]
    pub fn lists(&self) -> &[EntityList<E>] {
        &self.lists
    }

    /// Whether `id` names a list in this state.
    #[must_use]
    pub fn contains(&self, id: ListId) -> bool {
        id.0 < self.lists.len()
    }

    /// Borrow the list `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ListOutOfRange`] if `id` is not a list of this state.
    pub fn list(&self, id: ListId) -> Result<&EntityList<E>, StateError> {
        let count = self.lists.len();
        self.lists
            .get(id.0)
            .ok_or(StateError::ListOutOfRange { list: id.0, count })
    }

    /// Mutably borrow the list `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ListOutOfRange`] if `id` is not a list of this state.
    pub fn list_mut(&mut self, id: ListId) -> Result<&mut EntityList<E>, StateError> {
        let count = self.lists.len();
        self.lists
            .get_mut(id.0)
            .ok_or(StateError::ListOutOfRange { list: id.0, count })
    }

    /// Re-check structural invariants of every list.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyState`] or the first list's
    /// [`StateError::CursorInvariant`].
    pub fn validate(&self) -> Result<(), StateError> {
        if self.lists.is_empty() {
            return Err(StateError::EmptyState);
        }
        self.lists.iter().try_for_each(EntityList::validate)
    }

    /// Serialize the state identity: list count (u64 LE) then each list's
    /// identity encoding.
    ///
    /// Used for fingerprinting (dedup, goal-state equality).
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(self.lists.len() as u64).to_le_bytes());
        for list in &self.lists {
            list.write_identity(&mut buf);
        }
        buf
    }

    /// Identity equality: same lists, same entities, same cursors.
    #[must_use]
    pub fn identity_eq(&self, other: &Self) -> bool {
        self.identity_bytes() == other.identity_bytes()
    }
}
