//! `Plan`: the ordered action sequence a successful search returns.
//!
//! A plan refers to actions by library index, so it can be stored and
//! replayed later (undo/redo, versioning) against the same library.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;
use graft_kernel::proof::canon::canonical_json_bytes;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::action::ActionError;
use crate::error::SearchError;
use crate::library::ActionLibrary;

/// One step of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    /// Index of the action in the library the plan was found with.
    pub action_index: usize,
    pub action_name: String,
    /// Cost charged for this step, priced in the state it was taken from.
    pub cost: u64,
}

/// An ordered, immutable action sequence plus its total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub total_cost: u64,
}

impl Plan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the plan of a search whose initial state was already a goal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn action_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.action_name.as_str()).collect()
    }

    /// Re-apply every step to `initial` and return the final state.
    ///
    /// Each step's action is checked for legality in the current state before
    /// it is applied. `initial` is not modified.
    ///
    /// # Errors
    ///
    /// - [`ActionError::UnknownAction`] if a step's index is not in `library`
    /// - [`ActionError::IllegalApplication`] if a step is not legal where it
    ///   is replayed (the library or initial state differ from the search's)
    /// - any other [`ActionError`] raised by the action itself
    pub fn replay<E: Entity>(
        &self,
        library: &ActionLibrary<E>,
        initial: &EditState<E>,
    ) -> Result<EditState<E>, ActionError> {
        let mut state = initial.clone();
        for step in &self.steps {
            let action = library
                .get(step.action_index)
                .ok_or(ActionError::UnknownAction {
                    index: step.action_index,
                })?;
            state = action.apply(&state)?;
        }
        Ok(state)
    }

    /// Canonical JSON form (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|s| {
                serde_json::json!({
                    "action_index": s.action_index,
                    "action_name": s.action_name,
                    "cost": s.cost,
                })
            })
            .collect();
        let value = serde_json::json!({
            "steps": steps,
            "total_cost": self.total_cost,
        });
        Ok(canonical_json_bytes(&value)?)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        Ok(canonical_hash(HashDomain::Plan, &self.to_canonical_json_bytes()?))
    }
}
