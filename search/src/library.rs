//! `ActionLibrary`: the ordered, read-only action set handed to the planner.
//!
//! Library order is the expansion order of successors, so it is part of the
//! determinism contract: the same library (same actions, same order) yields
//! the same plan. The library is immutable after construction and is
//! `Send + Sync`, so concurrent searches can share one instance.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::{EditState, ListId};
use graft_kernel::proof::canon::canonical_json_bytes;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::action::{Action, ActionError, CostModel};
use crate::predicate::{Condition, Effect};

/// Immutable, ordered collection of actions.
#[derive(Debug, Clone)]
pub struct ActionLibrary<E> {
    actions: Vec<Action<E>>,
}

impl<E: Entity> ActionLibrary<E> {
    #[must_use]
    pub fn new(actions: Vec<Action<E>>) -> Self {
        Self { actions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action at `index` (library order).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Action<E>> {
        self.actions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action<E>> {
        self.actions.iter()
    }

    /// Run [`Action::verify`] for every action legal in `state`.
    ///
    /// Returns the names of legal actions whose verification failed; an
    /// empty vector means the library is self-consistent at `state`.
    ///
    /// # Errors
    ///
    /// Propagates [`ActionError::Malformed`].
    pub fn verify_all(&self, state: &EditState<E>) -> Result<Vec<String>, ActionError> {
        let mut failed = Vec::new();
        for action in &self.actions {
            if action.is_legal(state)? && !action.verify(state)? {
                failed.push(action.name().to_string());
            }
        }
        Ok(failed)
    }

    /// Digest over the inspectable parts of each action, in order: name,
    /// target, condition names, effect names, and constant cost (state-
    /// dependent costs are recorded as such).
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        let described: Vec<serde_json::Value> = self
            .actions
            .iter()
            .map(|a| {
                let cost = match a.cost_model() {
                    CostModel::Constant(c) => serde_json::json!({ "constant": c }),
                    CostModel::StateDependent(_) => serde_json::json!("state_dependent"),
                };
                serde_json::json!({
                    "conditions": a.conditions().iter().map(Condition::name).collect::<Vec<_>>(),
                    "cost": cost,
                    "effects": a.effects().iter().map(Effect::name).collect::<Vec<_>>(),
                    "name": a.name(),
                    "target": a.target().index(),
                })
            })
            .collect();
        // Only strings and integers above; canonicalization cannot fail.
        let bytes = canonical_json_bytes(&serde_json::Value::Array(described)).unwrap_or_default();
        canonical_hash(HashDomain::ActionLibrary, &bytes)
    }
}

impl<E: Entity> FromIterator<Action<E>> for ActionLibrary<E> {
    fn from_iter<I: IntoIterator<Item = Action<E>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The cursor-advance action: precondition `cursor < len`, effect
/// `cursor += 1`, cost 1.
#[must_use]
pub fn advance_cursor<E: Entity>(target: ListId) -> Action<E> {
    Action::new(format!("increase index {target}"), target)
        .with_condition(Condition::new(
            "cursor < len",
            move |s: &EditState<E>| Ok(!s.list(target)?.is_past_end()),
        ))
        .with_effect(Effect::new("cursor += 1", move |s: &mut EditState<E>| {
            s.list_mut(target)?.advance_cursor()
        }))
        .with_cost(1)
}
