//! Shared inputs for the graft benchmark suites.
//!
//! Inputs are generated deterministically (no RNG) so every run measures the
//! same searches. [`guard_digest`] pins the output of a benchmarked search;
//! a bench asserts it before and after timing to catch nondeterminism.

use graft_diff::entity::CodeEntity;
use graft_kernel::carrier::entity_list::EntityList;
use graft_kernel::carrier::state::{EditState, ListId};
use graft_kernel::proof::canon::canonical_json_bytes;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use graft_search::library::{advance_cursor, ActionLibrary};
use graft_search::search::{SearchOutcome, SearchResult};

/// A source/target pair of `len` code entities where roughly one in three
/// target entries differs from the source (renamed, dropped, or swapped).
#[must_use]
pub fn code_pair(len: usize) -> (Vec<CodeEntity>, Vec<CodeEntity>) {
    let source: Vec<CodeEntity> = (0..len)
        .map(|i| match i % 4 {
            0 => CodeEntity::declaration(format!("item_{i}")),
            1 => CodeEntity::invocation(format!("call_{i}")),
            2 => CodeEntity::assignment(format!("var_{i}")),
            _ => CodeEntity::control(format!("branch_{i}")),
        })
        .collect();

    let mut target = Vec::with_capacity(len);
    let mut i = 0;
    while i < source.len() {
        match i % 6 {
            2 => target.push(CodeEntity::assignment(format!("renamed_{i}"))),
            4 => {}
            5 if i + 1 < source.len() => {
                target.push(source[i + 1].clone());
                target.push(source[i].clone());
                i += 1;
            }
            _ => target.push(source[i].clone()),
        }
        i += 1;
    }
    (source, target)
}

/// `len` zero entities, cursor 0, with the single advance action.
#[must_use]
pub fn walk(len: usize) -> (EditState<u32>, ActionLibrary<u32>) {
    (
        EditState::single(EntityList::new(vec![0; len])),
        ActionLibrary::new(vec![advance_cursor(ListId::PRIMARY)]),
    )
}

/// Digest of what a search produced: the plan when found, otherwise the
/// outcome and counters.
#[must_use]
pub fn guard_digest(result: &SearchResult) -> ContentHash {
    let value = match &result.outcome {
        SearchOutcome::Found(plan) => serde_json::json!({
            "actions": plan.action_names(),
            "total_cost": plan.total_cost,
        }),
        other => serde_json::json!({
            "expansions": result.stats.expansions,
            "outcome": format!("{other:?}"),
        }),
    };
    // Strings and integers only; canonicalization cannot fail.
    let bytes = canonical_json_bytes(&value).unwrap_or_default();
    canonical_hash(HashDomain::BenchGuard, &bytes)
}
