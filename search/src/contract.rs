//! Goal contract: what the planner searches for.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;

/// A goal test over states.
///
/// # Contract
///
/// - `is_goal` must be pure: same state, same answer.
/// - It must not depend on anything that changes during a search.
pub trait Goal<E> {
    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &EditState<E>) -> bool;
}

/// Any pure predicate closure is a goal.
impl<E, F> Goal<E> for F
where
    F: Fn(&EditState<E>) -> bool,
{
    fn is_goal(&self, state: &EditState<E>) -> bool {
        self(state)
    }
}

/// A goal state: reached when a state is identity-equal to it.
#[derive(Debug, Clone)]
pub struct GoalState<E>(pub EditState<E>);

impl<E: Entity> Goal<E> for GoalState<E> {
    fn is_goal(&self, state: &EditState<E>) -> bool {
        self.0.identity_eq(state)
    }
}
