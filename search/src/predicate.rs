//! Predicate records: named conditions and named effects.
//!
//! A predicate is data: a name plus a shared, immutable function reference.
//! Conditions take `&EditState` and therefore cannot mutate their input.
//! Effects take `&mut EditState` and are only ever handed a clone owned by
//! the caller of [`Action::apply`](crate::action::Action::apply).
//!
//! Both function types are `Fn + Send + Sync`, so predicates carry no mutable
//! state and an action library can be shared across concurrently running
//! searches.

use std::fmt;
use std::sync::Arc;

use graft_kernel::carrier::error::StateError;
use graft_kernel::carrier::state::EditState;

/// Signature of a condition body.
pub type ConditionFn<E> = dyn Fn(&EditState<E>) -> Result<bool, StateError> + Send + Sync;

/// Signature of an effect body.
pub type EffectFn<E> = dyn Fn(&mut EditState<E>) -> Result<(), StateError> + Send + Sync;

/// A named, side-effect-free boolean test over a state.
pub struct Condition<E> {
    name: String,
    check: Arc<ConditionFn<E>>,
}

impl<E> Condition<E> {
    /// Build a condition from a name and its body.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&EditState<E>) -> Result<bool, StateError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// The condition's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate against `state`.
    ///
    /// # Errors
    ///
    /// Propagates the body's [`StateError`]; callers decide whether it is a
    /// bound check (not applicable) or a malformed state.
    pub fn evaluate(&self, state: &EditState<E>) -> Result<bool, StateError> {
        (self.check)(state)
    }
}

impl<E> Clone for Condition<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<E> fmt::Debug for Condition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

/// A named in-place mutation of a (cloned) state.
pub struct Effect<E> {
    name: String,
    run: Arc<EffectFn<E>>,
}

impl<E> Effect<E> {
    /// Build an effect from a name and its body.
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut EditState<E>) -> Result<(), StateError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    /// The effect's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mutate `state` in place.
    ///
    /// # Errors
    ///
    /// Propagates the body's [`StateError`].
    pub fn apply(&self, state: &mut EditState<E>) -> Result<(), StateError> {
        (self.run)(state)
    }
}

impl<E> Clone for Effect<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<E> fmt::Debug for Effect<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").field("name", &self.name).finish()
    }
}
