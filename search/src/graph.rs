//! `SearchGraph`: expansion-event audit log.
//!
//! The normative record is the ordered list of [`ExpandEvent`]s: which node
//! was popped, under which key, and what happened to every library action
//! at that node. Two searches over identical inputs produce byte-identical
//! canonical JSON.

use graft_kernel::proof::canon::canonical_json_bytes;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serde_json::{json, Value};

use crate::error::SearchError;
use crate::node::FrontierKey;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraph {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent>,
    pub metadata: SearchGraphMetadata,
}

/// A single frontier pop followed by action evaluation.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Total order of expansions.
    pub expansion_order: u64,
    pub node_id: u64,
    /// Hex fingerprint of the expanded state.
    pub state_fingerprint: String,
    /// The frontier key at pop time.
    pub pop_key: FrontierKey,
    /// One record per library action, in library order.
    pub candidates: Vec<CandidateRecord>,
    pub notes: Vec<ExpansionNote>,
}

/// What happened to one library action at one expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub action_index: usize,
    pub action_name: String,
    pub outcome: CandidateOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    /// Legal and applied; created node `to_node` at step cost `cost`.
    Applied { to_node: u64, cost: u64 },
    /// A condition was false (or hit a bound check).
    NotLegal,
    /// An effect hit a bound check; the action was skipped.
    OutOfBounds,
    /// The successor's state was already expanded.
    DuplicateSuppressed { fingerprint: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionNote {
    /// The frontier exceeded its cap and these nodes were dropped.
    FrontierPruned { pruned_node_ids: Vec<u64> },
}

/// Counters accumulated over one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expansions: u64,
    /// Successor nodes created (root excluded).
    pub nodes_generated: u64,
    /// Successors not pushed because their state was already closed.
    pub duplicates_suppressed: u64,
    /// Pops discarded because the state had been closed in the meantime.
    pub stale_pops: u64,
    pub frontier_high_water: u64,
    /// Whether any frontier pruning happened (completeness lost).
    pub pruned: bool,
}

/// Aggregate metadata with input bindings.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub root_state_fingerprint: String,
    pub library_digest: String,
    pub policy_digest: String,
    pub stats: SearchStats,
    pub termination_reason: TerminationReason,
}

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    GoalReached { node_id: u64 },
    /// Frontier emptied with no goal and no pruning: the goal is unreachable.
    FrontierExhausted,
    ExpansionBudgetExceeded,
    CostBudgetExceeded,
    /// Frontier emptied after pruning: a goal may have been discarded.
    FrontierBudgetExceeded,
    Cancelled,
}

impl TerminationReason {
    fn to_json(self) -> Value {
        match self {
            Self::GoalReached { node_id } => json!({"kind": "goal_reached", "node_id": node_id}),
            Self::FrontierExhausted => json!({"kind": "frontier_exhausted"}),
            Self::ExpansionBudgetExceeded => json!({"kind": "expansion_budget_exceeded"}),
            Self::CostBudgetExceeded => json!({"kind": "cost_budget_exceeded"}),
            Self::FrontierBudgetExceeded => json!({"kind": "frontier_budget_exceeded"}),
            Self::Cancelled => json!({"kind": "cancelled"}),
        }
    }
}

impl SearchGraph {
    /// Serialize to canonical JSON bytes (sorted keys, compact).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        Ok(canonical_json_bytes(&self.to_json_value())?)
    }

    /// Digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        Ok(canonical_hash(
            HashDomain::SearchGraph,
            &self.to_canonical_json_bytes()?,
        ))
    }

    fn to_json_value(&self) -> Value {
        json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEvent) -> Value {
    json!({
        "candidates": e.candidates.iter().map(candidate_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "notes": e.notes.iter().map(note_to_json).collect::<Vec<_>>(),
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "f_cost": e.pop_key.f_cost,
        },
        "state_fingerprint": e.state_fingerprint,
    })
}

fn candidate_to_json(r: &CandidateRecord) -> Value {
    let outcome = match &r.outcome {
        CandidateOutcome::Applied { to_node, cost } => {
            json!({"kind": "applied", "to_node": to_node, "cost": cost})
        }
        CandidateOutcome::NotLegal => json!({"kind": "not_legal"}),
        CandidateOutcome::OutOfBounds => json!({"kind": "out_of_bounds"}),
        CandidateOutcome::DuplicateSuppressed { fingerprint } => {
            json!({"kind": "duplicate_suppressed", "fingerprint": fingerprint})
        }
    };
    json!({
        "action_index": r.action_index,
        "action_name": r.action_name,
        "outcome": outcome,
    })
}

fn note_to_json(n: &ExpansionNote) -> Value {
    match n {
        ExpansionNote::FrontierPruned { pruned_node_ids } => {
            json!({"kind": "frontier_pruned", "pruned_node_ids": pruned_node_ids})
        }
    }
}

fn metadata_to_json(m: &SearchGraphMetadata) -> Value {
    json!({
        "library_digest": m.library_digest,
        "policy_digest": m.policy_digest,
        "root_state_fingerprint": m.root_state_fingerprint,
        "stats": {
            "duplicates_suppressed": m.stats.duplicates_suppressed,
            "expansions": m.stats.expansions,
            "frontier_high_water": m.stats.frontier_high_water,
            "nodes_generated": m.stats.nodes_generated,
            "pruned": m.stats.pruned,
            "stale_pops": m.stats.stale_pops,
        },
        "termination_reason": m.termination_reason.to_json(),
    })
}
