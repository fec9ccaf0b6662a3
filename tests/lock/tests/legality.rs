//! Legality lock tests: every plan step is legal where it is taken, every
//! legal action verifies in every reachable state, and planning leaves its
//! inputs untouched.

use graft_diff::vocabulary::{diff_library, diff_state, lists_match, LengthGapHeuristic};
use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::{EditState, ListId};
use graft_search::action::Action;
use graft_search::error::SearchError;
use graft_search::heuristic::ZeroHeuristic;
use graft_search::library::{advance_cursor, ActionLibrary};
use graft_search::plan::Plan;
use graft_search::policy::SearchPolicy;
use graft_search::predicate::Condition;
use graft_search::search::plan;
use lock_tests::fixtures::{
    cursor_at, mixed_goal, mixed_heuristic, mixed_library, toggle_library, walk_library, walk_state,
};
use lock_tests::oracle::reachable_states;

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Walk the plan, checking legality at each pre-state; returns the end state.
fn replay_checked<E: Entity>(
    found: &Plan,
    library: &ActionLibrary<E>,
    initial: &EditState<E>,
) -> EditState<E> {
    let mut state = initial.clone();
    for (i, step) in found.steps.iter().enumerate() {
        let action = library.get(step.action_index).expect("step index in library");
        assert_eq!(action.name(), step.action_name);
        assert!(
            action.is_legal(&state).unwrap(),
            "step {i} ({}) not legal where taken",
            step.action_name
        );
        assert_eq!(action.cost(&state), step.cost, "step {i} cost");
        state = action.apply(&state).unwrap();
    }
    state
}

#[test]
fn mixed_plan_steps_are_legal_in_order() {
    let library = mixed_library();
    for len in 0..=5 {
        let initial = walk_state(len);
        let result = plan(
            &initial,
            &mixed_goal,
            &library,
            &mixed_heuristic,
            &SearchPolicy::default(),
        )
        .unwrap();
        let found = result.plan().expect("mixed goal is always reachable");
        let end = replay_checked(found, &library, &initial);
        assert!(mixed_goal(&end), "len {len}");
    }
}

#[test]
fn diff_plan_steps_are_legal_in_order() {
    let library = diff_library::<char>();
    for (a, b) in [("abc", "cab"), ("kitten", "sitting"), ("", "xy"), ("xy", ""), ("abcd", "dcba")] {
        let initial = diff_state(chars(a), chars(b)).unwrap();
        let result = plan(
            &initial,
            &lists_match::<char>,
            &library,
            &LengthGapHeuristic,
            &SearchPolicy::default(),
        )
        .unwrap();
        let found = result.plan().expect("diff goal is always reachable");
        let end = replay_checked(found, &library, &initial);
        assert!(lists_match(&end), "{a} -> {b}");
    }
}

#[test]
fn planning_does_not_mutate_inputs() {
    let library = mixed_library();
    let initial = walk_state(4);
    let snapshot = initial.clone();
    let library_digest = library.digest();
    let policy = SearchPolicy::default();
    let policy_snapshot = policy.clone();

    plan(&initial, &mixed_goal, &library, &mixed_heuristic, &policy).unwrap();

    assert_eq!(initial, snapshot);
    assert_eq!(library.digest(), library_digest);
    assert_eq!(policy, policy_snapshot);
}

#[test]
fn panicking_condition_is_a_malformed_state_error() {
    // Reads the entity under the cursor without a bound check, so it panics
    // once the cursor reaches the end of `[0]`.
    let unchecked = Action::new("read current", ListId::PRIMARY).with_condition(Condition::new(
        "current is zero",
        |s: &EditState<u32>| {
            let list = s.list(ListId::PRIMARY)?;
            Ok(list.entities()[list.cursor()] == 0)
        },
    ));
    let library = ActionLibrary::new(vec![advance_cursor(ListId::PRIMARY), unchecked]);
    let result = plan(
        &walk_state(1),
        &cursor_at(5),
        &library,
        &ZeroHeuristic,
        &SearchPolicy::default(),
    );
    match result {
        Err(SearchError::MalformedState { detail }) => {
            assert!(detail.contains("`read current` panicked"), "{detail}");
        }
        other => panic!("expected MalformedState, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// is_legal implies verify, over every reachable state
// ---------------------------------------------------------------------------

fn assert_self_consistent<E: Entity>(
    label: &str,
    initial: &EditState<E>,
    library: &ActionLibrary<E>,
    depth: usize,
) {
    let states = reachable_states(initial, library, depth);
    assert!(!states.is_empty());
    for state in &states {
        let failed = library.verify_all(state).unwrap();
        assert!(failed.is_empty(), "{label}: {failed:?} failed verification");
    }
}

#[test]
fn walk_library_self_consistent() {
    assert_self_consistent("walk", &walk_state(4), &walk_library(), 6);
}

#[test]
fn toggle_library_self_consistent() {
    assert_self_consistent("toggle", &walk_state(1), &toggle_library(), 4);
}

#[test]
fn mixed_library_self_consistent() {
    assert_self_consistent("mixed", &walk_state(4), &mixed_library(), 8);
}

#[test]
fn diff_library_self_consistent() {
    for (a, b) in [("abca", "bac"), ("ab", "ba"), ("", "aa"), ("aab", "")] {
        let initial = diff_state(chars(a), chars(b)).unwrap();
        assert_self_consistent(
            &format!("diff {a} -> {b}"),
            &initial,
            &diff_library(),
            8,
        );
    }
}
