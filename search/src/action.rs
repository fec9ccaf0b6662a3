//! `Action`: a named, costed, list-targeted unit of structural change.
//!
//! An action is a conjunction of [`Condition`]s (all must hold) plus an
//! ordered sequence of [`Effect`]s (applied in declaration order to a clone;
//! later effects see earlier effects' mutations).
//!
//! # Failure classification
//!
//! A predicate body may fail with a [`StateError`]. Bound checks
//! (`IndexOutOfRange`, `ListOutOfRange`) mean "not applicable here" and are
//! absorbed: `is_legal` returns `false`, `apply` returns
//! [`ActionError::OutOfBounds`]. Any other failure is
//! [`ActionError::Malformed`] and aborts a search.

use std::fmt;
use std::sync::Arc;

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::error::StateError;
use graft_kernel::carrier::state::{EditState, ListId};

use crate::predicate::{Condition, Effect};

/// Signature of a state-dependent cost function.
pub type CostFn<E> = dyn Fn(&EditState<E>) -> u64 + Send + Sync;

/// How an action prices itself.
pub enum CostModel<E> {
    /// The same cost in every state.
    Constant(u64),
    /// Cost computed from the state the action is taken in.
    StateDependent(Arc<CostFn<E>>),
}

impl<E> Clone for CostModel<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Constant(c) => Self::Constant(*c),
            Self::StateDependent(f) => Self::StateDependent(Arc::clone(f)),
        }
    }
}

impl<E> fmt::Debug for CostModel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "Constant({c})"),
            Self::StateDependent(_) => f.write_str("StateDependent"),
        }
    }
}

/// Failure applying or checking an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// `apply` was called in a state where the action is not legal.
    /// A search loop never does this; seeing it is a programming error.
    #[error("action `{action}` applied without its precondition holding")]
    IllegalApplication { action: String },

    /// An effect hit a bound check. Recoverable: the action is skipped.
    #[error("action `{action}` not applicable: {source}")]
    OutOfBounds { action: String, source: StateError },

    /// A predicate failed for a reason other than a bound check, or the
    /// successor violates a structural invariant.
    #[error("action `{action}` hit a malformed state: {source}")]
    Malformed { action: String, source: StateError },

    /// A replayed plan names an action index the library does not have.
    #[error("no action at library index {index}")]
    UnknownAction { index: usize },
}

impl ActionError {
    /// True when the failure only means "not applicable in this state".
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// A named, costed unit of change guarded by conditions and realized by effects.
pub struct Action<E> {
    name: String,
    target: ListId,
    conditions: Vec<Condition<E>>,
    effects: Vec<Effect<E>>,
    cost: CostModel<E>,
}

impl<E: Entity> Action<E> {
    /// Start an action that edits list `target`. Cost defaults to `Constant(1)`.
    pub fn new(name: impl Into<String>, target: ListId) -> Self {
        Self {
            name: name.into(),
            target,
            conditions: Vec::new(),
            effects: Vec::new(),
            cost: CostModel::Constant(1),
        }
    }

    /// Append a condition to the precondition conjunction.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition<E>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Append an effect to the effect sequence.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect<E>) -> Self {
        self.effects.push(effect);
        self
    }

    /// Use a constant cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = CostModel::Constant(cost);
        self
    }

    /// Use a state-dependent cost.
    #[must_use]
    pub fn with_cost_fn<F>(mut self, cost: F) -> Self
    where
        F: Fn(&EditState<E>) -> u64 + Send + Sync + 'static,
    {
        self.cost = CostModel::StateDependent(Arc::new(cost));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The list this action edits.
    #[must_use]
    pub const fn target(&self) -> ListId {
        self.target
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition<E>] {
        &self.conditions
    }

    #[must_use]
    pub fn effects(&self) -> &[Effect<E>] {
        &self.effects
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel<E> {
        &self.cost
    }

    /// Whether every condition holds in `state`.
    ///
    /// Short-circuits on the first condition that is false. Returns `false`
    /// when the target list does not exist or a condition hits a bound check.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Malformed`] if a condition fails for any other reason.
    pub fn is_legal(&self, state: &EditState<E>) -> Result<bool, ActionError> {
        if !state.contains(self.target) {
            return Ok(false);
        }
        for condition in &self.conditions {
            match condition.evaluate(state) {
                Ok(true) => {}
                Ok(false) => return Ok(false),
                Err(e) if e.is_bound_check() => return Ok(false),
                Err(e) => return Err(self.malformed(e)),
            }
        }
        Ok(true)
    }

    /// Produce the successor state. `state` is not touched.
    ///
    /// # Errors
    ///
    /// - [`ActionError::IllegalApplication`] if the action is not legal in `state`
    /// - [`ActionError::OutOfBounds`] if an effect hits a bound check
    /// - [`ActionError::Malformed`] for any other failure, including a
    ///   successor that violates the cursor invariant
    pub fn apply(&self, state: &EditState<E>) -> Result<EditState<E>, ActionError> {
        if !self.is_legal(state)? {
            return Err(ActionError::IllegalApplication {
                action: self.name.clone(),
            });
        }
        self.run_effects(state)
    }

    /// Self-check: legal, effects apply cleanly, successor well-formed, the
    /// conditions still evaluate without error against the successor, and the
    /// successor differs from `state`.
    ///
    /// Returns `Ok(false)` when the action is not legal in `state`. Not used on
    /// the search hot path.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Malformed`] for non-bound predicate failures.
    pub fn verify(&self, state: &EditState<E>) -> Result<bool, ActionError> {
        if !self.is_legal(state)? {
            return Ok(false);
        }
        let next = match self.run_effects(state) {
            Ok(next) => next,
            Err(e) if e.is_recoverable() => return Ok(false),
            Err(e) => return Err(e),
        };
        for condition in &self.conditions {
            match condition.evaluate(&next) {
                Ok(_) => {}
                Err(e) if e.is_bound_check() => return Ok(false),
                Err(e) => return Err(self.malformed(e)),
            }
        }
        Ok(!next.identity_eq(state))
    }

    /// Cost of taking this action from `state`.
    #[must_use]
    pub fn cost(&self, state: &EditState<E>) -> u64 {
        match &self.cost {
            CostModel::Constant(c) => *c,
            CostModel::StateDependent(f) => f(state),
        }
    }

    fn run_effects(&self, state: &EditState<E>) -> Result<EditState<E>, ActionError> {
        let mut next = state.clone();
        for effect in &self.effects {
            effect.apply(&mut next).map_err(|e| {
                if e.is_bound_check() {
                    ActionError::OutOfBounds {
                        action: self.name.clone(),
                        source: e,
                    }
                } else {
                    self.malformed(e)
                }
            })?;
        }
        next.validate().map_err(|e| self.malformed(e))?;
        Ok(next)
    }

    fn malformed(&self, source: StateError) -> ActionError {
        ActionError::Malformed {
            action: self.name.clone(),
            source,
        }
    }
}

impl<E> Clone for Action<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            target: self.target,
            conditions: self.conditions.clone(),
            effects: self.effects.clone(),
            cost: self.cost.clone(),
        }
    }
}

impl<E> fmt::Debug for Action<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("conditions", &self.conditions)
            .field("effects", &self.effects)
            .field("cost", &self.cost)
            .finish()
    }
}
