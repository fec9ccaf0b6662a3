//! Heuristic contract: estimated remaining cost to a goal.

use graft_kernel::carrier::state::EditState;

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// Plans are cost-optimal when the estimate is admissible (never exceeds the
/// true remaining cost) and consistent (`h(s) <= cost(s, a) + h(a(s))`).
/// Estimates are integers so frontier ordering is exact.
pub trait Heuristic<E> {
    fn estimate(&self, state: &EditState<E>) -> u64;
}

/// The trivial estimate. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<E> Heuristic<E> for ZeroHeuristic {
    fn estimate(&self, _state: &EditState<E>) -> u64 {
        0
    }
}

impl<E, F> Heuristic<E> for F
where
    F: Fn(&EditState<E>) -> u64,
{
    fn estimate(&self, state: &EditState<E>) -> u64 {
        self(state)
    }
}
