//! Optimality lock tests: with an admissible, consistent heuristic the plan
//! cost equals the brute-force minimum over all action sequences.

use graft_diff::runner::plan_edits;
use graft_diff::vocabulary::{diff_library, diff_state, lists_match, LengthGapHeuristic};
use graft_kernel::carrier::state::EditState;
use graft_search::heuristic::ZeroHeuristic;
use graft_search::policy::{PolicyConfig, SearchPolicy};
use graft_search::search::{plan, SearchOutcome};
use lock_tests::fixtures::{mixed_goal, mixed_heuristic, mixed_library, walk_state};
use lock_tests::oracle::{diff_depth_bound, min_cost};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Synthetic cursor spaces, lengths 0..=5
// ---------------------------------------------------------------------------

#[test]
fn mixed_library_matches_brute_force() {
    let library = mixed_library();
    for len in 0..=5 {
        let initial = walk_state(len);
        let expected = min_cost(&initial, &mixed_goal, &library, 10);

        for heuristic_name in ["zero", "half_remaining"] {
            let result = if heuristic_name == "zero" {
                plan(&initial, &mixed_goal, &library, &ZeroHeuristic, &SearchPolicy::default())
            } else {
                plan(&initial, &mixed_goal, &library, &mixed_heuristic, &SearchPolicy::default())
            }
            .unwrap();
            assert_eq!(
                result.plan().map(|p| p.total_cost),
                expected,
                "len {len}, heuristic {heuristic_name}"
            );
        }
    }
}

#[test]
fn plan_cost_is_sum_of_step_costs() {
    let library = mixed_library();
    let result = plan(
        &walk_state(5),
        &mixed_goal,
        &library,
        &mixed_heuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    let found = result.plan().unwrap();
    assert_eq!(
        found.total_cost,
        found.steps.iter().map(|s| s.cost).sum::<u64>()
    );

    // Replaying reaches a goal.
    let end = found.replay(&library, &walk_state(5)).unwrap();
    assert!(mixed_goal(&end));
}

// ---------------------------------------------------------------------------
// Diff vocabulary
// ---------------------------------------------------------------------------

fn diff_oracle(a: &[char], b: &[char]) -> Option<u64> {
    let initial: EditState<char> = diff_state(a.to_vec(), b.to_vec()).unwrap();
    min_cost(
        &initial,
        &lists_match::<char>,
        &diff_library::<char>(),
        diff_depth_bound(a.len(), b.len()),
    )
}

#[test]
fn diff_exhaustive_over_two_letter_sequences() {
    // Every pair of sequences of length <= 3 over {a, b}.
    let mut all: Vec<Vec<char>> = vec![Vec::new()];
    for len in 1..=3 {
        for bits in 0..(1u32 << len) {
            all.push(
                (0..len)
                    .map(|i| if bits & (1 << i) == 0 { 'a' } else { 'b' })
                    .collect(),
            );
        }
    }
    for a in &all {
        for b in &all {
            let report = plan_edits(a, b, &PolicyConfig::default()).unwrap();
            assert_eq!(report.cost(), diff_oracle(a, b), "{a:?} -> {b:?}");
        }
    }
}

#[test]
fn diff_heuristic_does_not_change_cost() {
    let a: Vec<char> = "abcab".chars().collect();
    let b: Vec<char> = "bacb".chars().collect();
    let initial = diff_state(a.clone(), b.clone()).unwrap();
    let library = diff_library::<char>();
    let guided = plan(
        &initial,
        &lists_match::<char>,
        &library,
        &LengthGapHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    let uniform = plan(
        &initial,
        &lists_match::<char>,
        &library,
        &ZeroHeuristic,
        &SearchPolicy::default(),
    )
    .unwrap();
    assert_eq!(
        guided.plan().map(|p| p.total_cost),
        uniform.plan().map(|p| p.total_cost)
    );
}

fn sequence() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c']), 0..=3)
}

proptest! {
    #[test]
    fn diff_cost_matches_brute_force(a in sequence(), b in sequence()) {
        let report = plan_edits(&a, &b, &PolicyConfig::default()).unwrap();
        prop_assert!(matches!(report.outcome, SearchOutcome::Found(_)));
        prop_assert_eq!(report.cost(), diff_oracle(&a, &b));
    }

    #[test]
    fn diff_script_replays_to_target(a in sequence(), b in sequence()) {
        let report = plan_edits(&a, &b, &PolicyConfig::default()).unwrap();
        let script = report.script.unwrap();
        prop_assert_eq!(script.apply_to(&a).unwrap(), b.clone());
        prop_assert_eq!(report.edited, Some(b));
    }

    #[test]
    fn diff_cost_bounded_by_trivial_rewrite(a in sequence(), b in sequence()) {
        // Removing everything and inserting everything always works.
        let report = plan_edits(&a, &b, &PolicyConfig::default()).unwrap();
        let cost = report.cost().unwrap();
        prop_assert!(cost <= (a.len() + b.len()) as u64);
        prop_assert!(cost >= a.len().abs_diff(b.len()) as u64);
    }
}
