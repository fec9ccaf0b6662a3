//! `EntityList`: an ordered entity sequence with a progress cursor.
//!
//! # Invariant
//!
//! `0 <= cursor <= len`. `cursor == len` is "past the end", the terminal
//! position for cursor-driven actions. Every constructor and mutator keeps the
//! invariant; [`EntityList::validate`] re-checks it for defensive callers.
//!
//! # Copy-on-write
//!
//! Entities live behind an `Arc<Vec<E>>`. Cloning a list is O(1) and shares
//! storage; the first mutation of the entity sequence on either side copies
//! it (`Arc::make_mut`). Cursor moves never copy. A clone is therefore
//! observationally independent of its source.

use std::sync::Arc;

use crate::carrier::entity::Entity;
use crate::carrier::error::StateError;

/// An ordered sequence of entities plus a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityList<E> {
    entities: Arc<Vec<E>>,
    cursor: usize,
}

impl<E: Entity> EntityList<E> {
    /// Create a list with the cursor at position 0.
    #[must_use]
    pub fn new(entities: Vec<E>) -> Self {
        Self {
            entities: Arc::new(entities),
            cursor: 0,
        }
    }

    /// Create a list with an explicit cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::CursorInvariant`] if `cursor > entities.len()`.
    pub fn with_cursor(entities: Vec<E>, cursor: usize) -> Result<Self, StateError> {
        let mut list = Self::new(entities);
        list.set_cursor(cursor)?;
        Ok(list)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the list holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor sits at the terminal position (`cursor == len`).
    #[must_use]
    pub fn is_past_end(&self) -> bool {
        self.cursor >= self.entities.len()
    }

    /// Entities from the cursor to the end.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.entities.len().saturating_sub(self.cursor)
    }

    /// All entities in order.
    #[must_use]
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// Entity at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&E, StateError> {
        self.entities.get(index).ok_or(StateError::IndexOutOfRange {
            index,
            len: self.entities.len(),
        })
    }

    /// Entity under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when the cursor is past the end.
    pub fn current(&self) -> Result<&E, StateError> {
        self.get(self.cursor)
    }

    /// Move the cursor one position forward.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when the cursor is already past the end.
    pub fn advance_cursor(&mut self) -> Result<(), StateError> {
        if self.is_past_end() {
            return Err(StateError::IndexOutOfRange {
                index: self.cursor,
                len: self.entities.len(),
            });
        }
        self.cursor += 1;
        Ok(())
    }

    /// Place the cursor at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::CursorInvariant`] if `cursor > len`. This is not a
    /// bound check: an effect that tries it has a logic error.
    pub fn set_cursor(&mut self, cursor: usize) -> Result<(), StateError> {
        if cursor > self.entities.len() {
            return Err(StateError::CursorInvariant {
                cursor,
                len: self.entities.len(),
            });
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Insert `entity` at the cursor. The cursor then points at the new entity.
    pub fn insert_at_cursor(&mut self, entity: E) {
        let at = self.cursor;
        Arc::make_mut(&mut self.entities).insert(at, entity);
    }

    /// Remove and return the entity under the cursor. The cursor stays put and
    /// now points at the former successor (or past the end).
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when the cursor is past the end.
    pub fn remove_at_cursor(&mut self) -> Result<E, StateError> {
        if self.is_past_end() {
            return Err(StateError::IndexOutOfRange {
                index: self.cursor,
                len: self.entities.len(),
            });
        }
        let at = self.cursor;
        Ok(Arc::make_mut(&mut self.entities).remove(at))
    }

    /// Replace the entity under the cursor, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] when the cursor is past the end.
    pub fn replace_at_cursor(&mut self, entity: E) -> Result<E, StateError> {
        if self.is_past_end() {
            return Err(StateError::IndexOutOfRange {
                index: self.cursor,
                len: self.entities.len(),
            });
        }
        let at = self.cursor;
        Ok(std::mem::replace(
            &mut Arc::make_mut(&mut self.entities)[at],
            entity,
        ))
    }

    /// Move the entity at `from` so that it ends up at position `to`.
    /// The cursor is not adjusted.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::IndexOutOfRange`] if either position is `>= len`.
    pub fn move_entity(&mut self, from: usize, to: usize) -> Result<(), StateError> {
        let len = self.entities.len();
        for index in [from, to] {
            if index >= len {
                return Err(StateError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let entities = Arc::make_mut(&mut self.entities);
        let entity = entities.remove(from);
        entities.insert(to, entity);
        Ok(())
    }

    /// Re-check the cursor invariant.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::CursorInvariant`] if `cursor > len`.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.cursor > self.entities.len() {
            return Err(StateError::CursorInvariant {
                cursor: self.cursor,
                len: self.entities.len(),
            });
        }
        Ok(())
    }

    /// Append the identity encoding: entity count (u64 LE), each entity's
    /// identity bytes, then the cursor (u64 LE).
    pub fn write_identity(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&(self.entities.len() as u64).to_le_bytes());
        for entity in self.entities.iter() {
            entity.write_identity(buf);
        }
        buf.extend_from_slice(&(self.cursor as u64).to_le_bytes());
    }

    /// Whether two lists still share entity storage (no write has split them).
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entities, &other.entities)
    }
}

impl<E: Entity> FromIterator<E> for EntityList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
