//! Search policy: budgets and dedup configuration.
//!
//! [`SearchPolicy`] is the resolved configuration a search runs under.
//! [`PolicyConfig`] carries optional overrides (e.g. parsed from a JSON
//! config file) and resolves against the defaults.

use graft_kernel::proof::canon::canonical_json_bytes;
use graft_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

const DEFAULT_MAX_EXPANSIONS: u64 = 10_000;
const DEFAULT_MAX_FRONTIER_SIZE: u64 = 100_000;

/// Budget and dedup configuration for one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPolicy {
    /// Hard cap on node expansions.
    pub max_expansions: u64,
    /// Optional cap on plan cost. A popped node with `f_cost` above it ends
    /// the search: nothing cheaper is left.
    pub max_cost: Option<u64>,
    /// Frontier prune threshold.
    pub max_frontier_size: u64,
    /// How states are recognized as already visited.
    pub dedup: DedupPolicy,
    /// Record the per-expansion audit graph.
    pub record_graph: bool,
}

impl SearchPolicy {
    /// Reject budgets that would make every search fail trivially.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget or
    /// a zero frontier cap.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.max_frontier_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_frontier_size must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Canonical JSON form (sorted keys, integers only).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, SearchError> {
        let value = serde_json::json!({
            "dedup": self.dedup.as_str(),
            "max_cost": self.max_cost,
            "max_expansions": self.max_expansions,
            "max_frontier_size": self.max_frontier_size,
            "record_graph": self.record_graph,
        });
        Ok(canonical_json_bytes(&value)?)
    }

    /// Digest of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Canon`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, SearchError> {
        Ok(canonical_hash(
            HashDomain::SearchPolicy,
            &self.to_canonical_json_bytes()?,
        ))
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            max_cost: None,
            max_frontier_size: DEFAULT_MAX_FRONTIER_SIZE,
            dedup: DedupPolicy::StateIdentity,
            record_graph: true,
        }
    }
}

/// How the search recognizes revisited states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Close states by identity fingerprint; expand each state at most once.
    StateIdentity,
    /// No closed set (tree search). Termination then rests on the budget.
    Disabled,
}

impl DedupPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StateIdentity => "state_identity",
            Self::Disabled => "disabled",
        }
    }
}

/// Optional overrides for [`SearchPolicy`]. `None` keeps the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub max_expansions: Option<u64>,
    pub max_cost: Option<u64>,
    pub max_frontier_size: Option<u64>,
    pub dedup: Option<DedupPolicy>,
    pub record_graph: Option<bool>,
}

impl PolicyConfig {
    /// Parse overrides from JSON, e.g. `{"max_expansions": 500}`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] on malformed JSON or unknown keys.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        serde_json::from_slice(bytes).map_err(|e| SearchError::InvalidPolicy {
            detail: format!("policy config: {e}"),
        })
    }

    /// Resolve against the defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the resolved policy is invalid.
    pub fn resolve(&self) -> Result<SearchPolicy, SearchError> {
        let defaults = SearchPolicy::default();
        let policy = SearchPolicy {
            max_expansions: self.max_expansions.unwrap_or(defaults.max_expansions),
            max_cost: self.max_cost.or(defaults.max_cost),
            max_frontier_size: self.max_frontier_size.unwrap_or(defaults.max_frontier_size),
            dedup: self.dedup.unwrap_or(defaults.dedup),
            record_graph: self.record_graph.unwrap_or(defaults.record_graph),
        };
        policy.validate()?;
        Ok(policy)
    }
}
