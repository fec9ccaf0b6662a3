//! Search nodes and the frontier ordering key.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// A search node: a state plus the bookkeeping needed to price and trace it.
///
/// Ordering for frontier extraction uses `(f_cost, creation_order)` where
/// `f_cost = g_cost + h_cost`. Lower is better; ties go to the older node.
#[derive(Debug, Clone)]
pub struct SearchNode<E> {
    /// Identifier assigned in creation order (root = 0).
    pub node_id: u64,
    /// Parent node (`None` for root).
    pub parent_id: Option<u64>,
    /// The state this node stands for. Owned exclusively by this node.
    pub state: EditState<E>,
    /// Canonical hash of the state's identity bytes.
    pub state_fingerprint: ContentHash,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Accumulated path cost.
    pub g_cost: u64,
    /// Heuristic estimate to goal.
    pub h_cost: u64,
    /// Per-search monotone counter for deterministic tie-breaking.
    pub creation_order: u64,
    /// Library index of the action that produced this node.
    pub producing_action: Option<usize>,
}

impl<E> SearchNode<E> {
    /// `f_cost = g_cost + h_cost`, saturating.
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// Fingerprint of a state for dedup and audit.
#[must_use]
pub fn state_fingerprint<E: Entity>(state: &EditState<E>) -> ContentHash {
    canonical_hash(HashDomain::StateIdentity, &state.identity_bytes())
}

/// The frontier ordering key: `(f_cost, creation_order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f_cost: u64,
    pub creation_order: u64,
}

impl<E> From<&SearchNode<E>> for FrontierKey {
    fn from(node: &SearchNode<E>) -> Self {
        Self {
            f_cost: node.f_cost(),
            creation_order: node.creation_order,
        }
    }
}
