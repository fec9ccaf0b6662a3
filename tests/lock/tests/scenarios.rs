//! Acceptance scenarios for the planner.
//!
//! A: walk a length-3 list to its end.
//! B: an empty list can never be walked.
//! C: an already-satisfied goal yields the empty plan.
//! D: zero-cost actions that undo each other end in budget exhaustion.

use graft_search::contract::GoalState;
use graft_search::heuristic::ZeroHeuristic;
use graft_search::plan::Plan;
use graft_search::policy::{DedupPolicy, SearchPolicy};
use graft_search::search::{plan, BudgetKind, SearchOutcome};
use lock_tests::fixtures::{
    contains, cursor_at, push_pop_library, toggle_library, walk_library, walk_state,
};

// ---------------------------------------------------------------------------
// A
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_three_advances() {
    let result = plan(
        &walk_state(3),
        &cursor_at(3),
        &walk_library(),
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();

    let found = result.plan().expect("plan found");
    assert_eq!(
        found.action_names(),
        vec!["increase index list#0"; 3],
        "expected three cursor advances"
    );
    assert_eq!(found.total_cost, 3);
    assert!(found.steps.iter().all(|s| s.action_index == 0 && s.cost == 1));
}

// ---------------------------------------------------------------------------
// B
// ---------------------------------------------------------------------------

#[test]
fn scenario_b_empty_list_no_plan() {
    let result = plan(
        &walk_state(0),
        &cursor_at(3),
        &walk_library(),
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.outcome, SearchOutcome::NoPlanFound);
    assert_eq!(result.stats.expansions, 1, "only the root is expanded");
    assert_eq!(result.stats.nodes_generated, 0);
}

// ---------------------------------------------------------------------------
// C
// ---------------------------------------------------------------------------

#[test]
fn scenario_c_goal_already_satisfied() {
    let initial = walk_state(3);

    let by_predicate = plan(
        &initial,
        &cursor_at(0),
        &walk_library(),
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert_eq!(by_predicate.outcome, SearchOutcome::Found(Plan::default()));

    let by_state = plan(
        &initial,
        &GoalState(initial.clone()),
        &walk_library(),
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    let found = by_state.plan().expect("plan found");
    assert!(found.is_empty());
    assert_eq!(found.total_cost, 0);
}

// ---------------------------------------------------------------------------
// D
// ---------------------------------------------------------------------------

#[test]
fn scenario_d_cyclic_pair_without_dedup_exhausts() {
    let policy = SearchPolicy {
        max_expansions: 200,
        dedup: DedupPolicy::Disabled,
        ..SearchPolicy::default()
    };
    let result = plan(
        &walk_state(1),
        &contains(7),
        &toggle_library(),
        &ZeroHeuristic,
        &policy,
    )
    .unwrap();

    assert_eq!(
        result.outcome,
        SearchOutcome::SearchExhausted {
            budget: BudgetKind::Expansions
        }
    );
    assert_eq!(result.stats.expansions, 200);
}

#[test]
fn scenario_d_unbounded_undo_pair_exhausts_with_dedup() {
    let policy = SearchPolicy {
        max_expansions: 200,
        ..SearchPolicy::default()
    };
    let result = plan(
        &walk_state(0),
        &contains(7),
        &push_pop_library(),
        &ZeroHeuristic,
        &policy,
    )
    .unwrap();

    assert_eq!(
        result.outcome,
        SearchOutcome::SearchExhausted {
            budget: BudgetKind::Expansions
        }
    );
    assert!(
        result.stats.duplicates_suppressed > 0,
        "pop undoes push; the undone state must be recognized"
    );
}

#[test]
fn scenario_d_cyclic_pair_with_dedup_terminates_without_plan() {
    let result = plan(
        &walk_state(1),
        &contains(7),
        &toggle_library(),
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert_eq!(result.outcome, SearchOutcome::NoPlanFound);
}
