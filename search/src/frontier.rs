//! Best-first frontier with a closed set.
//!
//! A stable min-heap keyed by `(f_cost, creation_order)`. The closed set holds
//! fingerprints of expanded states; it is a `BTreeSet` (not a `HashSet`) so
//! any iteration over it is deterministic.
//!
//! The frontier may hold several entries for one state (reached along
//! different paths). The search loop closes a state when it first pops it and
//! discards later pops of the same fingerprint.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::node::{FrontierKey, SearchNode};

/// `BinaryHeap` is a max-heap; `Reverse` turns it into a min-heap.
#[derive(Debug)]
struct FrontierEntry<E> {
    key: Reverse<FrontierKey>,
    node: SearchNode<E>,
}

impl<E> PartialEq for FrontierEntry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<E> Eq for FrontierEntry<E> {}

impl<E> PartialOrd for FrontierEntry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for FrontierEntry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best node
/// - A `BTreeSet<String>` of closed (expanded) state fingerprint hex digests
pub struct BestFirstFrontier<E> {
    heap: BinaryHeap<FrontierEntry<E>>,
    closed: BTreeSet<String>,
    high_water: u64,
}

impl<E> BestFirstFrontier<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            closed: BTreeSet::new(),
            high_water: 0,
        }
    }

    /// Push a node. Duplicates of open states are allowed.
    pub fn push(&mut self, node: SearchNode<E>) {
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the node with the lowest `(f_cost, creation_order)`.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode<E>> {
        self.heap.pop().map(|e| e.node)
    }

    /// Mark a fingerprint as expanded. Returns `false` if it already was.
    pub fn close(&mut self, fingerprint_hex: &str) -> bool {
        self.closed.insert(fingerprint_hex.to_string())
    }

    #[must_use]
    pub fn is_closed(&self, fingerprint_hex: &str) -> bool {
        self.closed.contains(fingerprint_hex)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of closed states.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Prune the frontier to at most `max_size` entries, keeping the best by
    /// frontier key. Returns the `node_id`s of pruned nodes in key order.
    pub fn prune_to(&mut self, max_size: usize) -> Vec<u64> {
        if self.heap.len() <= max_size {
            return Vec::new();
        }
        let mut entries: Vec<FrontierEntry<E>> = self.heap.drain().collect();
        entries.sort_by(|a, b| a.key.0.cmp(&b.key.0));
        let pruned = entries
            .split_off(max_size)
            .into_iter()
            .map(|e| e.node.node_id)
            .collect();
        self.heap = entries.into_iter().collect();
        pruned
    }
}

impl<E> Default for BestFirstFrontier<E> {
    fn default() -> Self {
        Self::new()
    }
}
