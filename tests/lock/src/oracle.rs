//! Brute-force oracles the planner is checked against.

use std::collections::{BTreeSet, HashMap, VecDeque};

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;
use graft_search::library::ActionLibrary;

/// Minimum total cost over every action sequence of at most `max_depth`
/// steps that reaches a goal, or `None` if no such sequence exists.
///
/// Exhaustive enumeration of sequences, memoized on `(state, depth left)`.
/// Costs are non-negative, so a sequence never gains by passing through a
/// goal and continuing; the first goal on a path ends it.
///
/// # Panics
///
/// Panics if an action reports a malformed state; fixtures never do.
pub fn min_cost<E: Entity>(
    initial: &EditState<E>,
    goal: &dyn Fn(&EditState<E>) -> bool,
    library: &ActionLibrary<E>,
    max_depth: usize,
) -> Option<u64> {
    let mut memo = HashMap::new();
    min_cost_from(initial, goal, library, max_depth, &mut memo)
}

fn min_cost_from<E: Entity>(
    state: &EditState<E>,
    goal: &dyn Fn(&EditState<E>) -> bool,
    library: &ActionLibrary<E>,
    depth_left: usize,
    memo: &mut HashMap<(Vec<u8>, usize), Option<u64>>,
) -> Option<u64> {
    if goal(state) {
        return Some(0);
    }
    if depth_left == 0 {
        return None;
    }
    let key = (state.identity_bytes(), depth_left);
    if let Some(known) = memo.get(&key) {
        return *known;
    }

    let mut best: Option<u64> = None;
    for action in library.iter() {
        if !action.is_legal(state).unwrap() {
            continue;
        }
        let Ok(next) = action.apply(state) else {
            continue;
        };
        if let Some(rest) = min_cost_from(&next, goal, library, depth_left - 1, memo) {
            let total = action.cost(state) + rest;
            best = Some(best.map_or(total, |b| b.min(total)));
        }
    }

    memo.insert(key, best);
    best
}

/// Every state reachable from `initial` within `max_depth` steps, `initial`
/// included, in breadth-first discovery order.
///
/// # Panics
///
/// Panics if an action reports a malformed state; fixtures never do.
pub fn reachable_states<E: Entity>(
    initial: &EditState<E>,
    library: &ActionLibrary<E>,
    max_depth: usize,
) -> Vec<EditState<E>> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    let mut queue = VecDeque::from([(initial.clone(), 0usize)]);
    seen.insert(initial.identity_bytes());

    while let Some((state, depth)) = queue.pop_front() {
        if depth < max_depth {
            for action in library.iter() {
                if !action.is_legal(&state).unwrap() {
                    continue;
                }
                let Ok(next) = action.apply(&state) else {
                    continue;
                };
                if seen.insert(next.identity_bytes()) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
        out.push(state);
    }
    out
}

/// Number of steps that bounds any diff plan from `source_len` to
/// `target_len`: each step advances the cursor (at most `target_len` times)
/// or removes a working entity (at most `source_len + target_len` times).
#[must_use]
pub const fn diff_depth_bound(source_len: usize, target_len: usize) -> usize {
    source_len + 2 * target_len
}
