//! `EditScript`: a diff plan as positional edit operations.
//!
//! Positions refer to the sequence as it stands when the operation runs, so
//! operations apply strictly in order.

use std::fmt;

use graft_kernel::carrier::entity::Entity;

use crate::error::DiffError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp<E> {
    /// The entity at `index` already matches.
    Keep { index: usize },
    Insert { index: usize, entity: E },
    Remove { index: usize, entity: E },
    Replace { index: usize, old: E, new: E },
    /// Move the entity at `from` so that it ends up at `to` (`to < from`).
    Reorder { from: usize, to: usize },
}

impl<E> EditOp<E> {
    /// False only for [`EditOp::Keep`].
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Keep { .. })
    }
}

impl<E: Entity> fmt::Display for EditOp<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep { index } => write!(f, "keep @{index}"),
            Self::Insert { index, entity } => write!(f, "insert @{index} {}", entity.label()),
            Self::Remove { index, entity } => write!(f, "remove @{index} {}", entity.label()),
            Self::Replace { index, old, new } => {
                write!(f, "replace @{index} {} -> {}", old.label(), new.label())
            }
            Self::Reorder { from, to } => write!(f, "reorder @{from} -> @{to}"),
        }
    }
}

/// Ordered edit operations plus the plan cost they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript<E> {
    pub ops: Vec<EditOp<E>>,
    pub total_cost: u64,
}

impl<E: Entity> EditScript<E> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations that change the sequence.
    pub fn changes(&self) -> impl Iterator<Item = &EditOp<E>> {
        self.ops.iter().filter(|op| op.is_change())
    }

    /// Replay the script on `source` and return the edited sequence.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::ScriptMismatch`] when an operation's position is
    /// out of range or the entity it expects is not there, i.e. the script
    /// was derived from a different source.
    pub fn apply_to(&self, source: &[E]) -> Result<Vec<E>, DiffError> {
        let mut out = source.to_vec();
        for (op_index, op) in self.ops.iter().enumerate() {
            let mismatch = |detail: String| DiffError::ScriptMismatch { op_index, detail };
            match op {
                EditOp::Keep { index } => {
                    if *index >= out.len() {
                        return Err(mismatch(format!("keep past end at {index}")));
                    }
                }
                EditOp::Insert { index, entity } => {
                    if *index > out.len() {
                        return Err(mismatch(format!("insert past end at {index}")));
                    }
                    out.insert(*index, entity.clone());
                }
                EditOp::Remove { index, entity } => {
                    if out.get(*index) != Some(entity) {
                        return Err(mismatch(format!("no {} at {index}", entity.label())));
                    }
                    out.remove(*index);
                }
                EditOp::Replace { index, old, new } => {
                    match out.get_mut(*index) {
                        Some(slot) if *slot == *old => *slot = new.clone(),
                        _ => return Err(mismatch(format!("no {} at {index}", old.label()))),
                    }
                }
                EditOp::Reorder { from, to } => {
                    if *from >= out.len() || *to > *from {
                        return Err(mismatch(format!("cannot move {from} to {to}")));
                    }
                    let entity = out.remove(*from);
                    out.insert(*to, entity);
                }
            }
        }
        Ok(out)
    }
}

impl<E: Entity> fmt::Display for EditScript<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
