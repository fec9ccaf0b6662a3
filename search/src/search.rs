//! Search entry point and expansion loop.
//!
//! Best-first (A*) over `g + h`. A node is goal-tested and closed when it is
//! popped, not when it is generated, so with an admissible and consistent
//! heuristic the first goal popped is optimal.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;
use tracing::{debug, trace, warn};

use crate::action::{Action, ActionError};
use crate::contract::Goal;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::graph::{
    CandidateOutcome, CandidateRecord, ExpandEvent, ExpansionNote, SearchGraph,
    SearchGraphMetadata, SearchStats, TerminationReason,
};
use crate::heuristic::Heuristic;
use crate::library::ActionLibrary;
use crate::node::{state_fingerprint, FrontierKey, SearchNode};
use crate::plan::{Plan, PlanStep};
use crate::policy::{DedupPolicy, SearchPolicy};

/// Which budget ended a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetKind {
    Expansions,
    Cost,
    /// The frontier was pruned and then ran dry.
    Frontier,
}

/// How a search ended. None of these is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Plan),
    /// The reachable state space holds no goal.
    NoPlanFound,
    SearchExhausted { budget: BudgetKind },
    Cancelled,
}

/// Outcome plus the counters and (optionally) the audit graph.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Present when [`SearchPolicy::record_graph`] is set.
    pub graph: Option<SearchGraph>,
}

impl SearchResult {
    /// The plan, if the search found one.
    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        match &self.outcome {
            SearchOutcome::Found(plan) => Some(plan),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }
}

/// What plan reconstruction needs from a node once its state is gone.
#[derive(Debug, Clone, Copy)]
struct NodeTrace {
    parent_id: Option<u64>,
    producing_action: Option<usize>,
    step_cost: u64,
}

/// Run A* from `initial` until `goal` holds.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if `policy` fails validation
/// - [`SearchError::MalformedState`] if `initial` breaks the cursor invariant,
///   an action fails during search for a reason other than a bound check, or
///   a caller-supplied condition, effect, cost, goal or heuristic panics
/// - [`SearchError::Canon`] if the audit graph cannot be serialized for digests
pub fn plan<E, G, H>(
    initial: &EditState<E>,
    goal: &G,
    library: &ActionLibrary<E>,
    heuristic: &H,
    policy: &SearchPolicy,
) -> Result<SearchResult, SearchError>
where
    E: Entity,
    G: Goal<E> + ?Sized,
    H: Heuristic<E> + ?Sized,
{
    plan_cancellable(
        initial,
        goal,
        library,
        heuristic,
        policy,
        &AtomicBool::new(false),
    )
}

/// [`plan`] with a cancellation flag checked at the top of every expansion.
///
/// # Errors
///
/// Same as [`plan`].
#[allow(clippy::too_many_lines)]
pub fn plan_cancellable<E, G, H>(
    initial: &EditState<E>,
    goal: &G,
    library: &ActionLibrary<E>,
    heuristic: &H,
    policy: &SearchPolicy,
    cancel: &AtomicBool,
) -> Result<SearchResult, SearchError>
where
    E: Entity,
    G: Goal<E> + ?Sized,
    H: Heuristic<E> + ?Sized,
{
    policy.validate()?;
    initial
        .validate()
        .map_err(|e| SearchError::MalformedState {
            detail: format!("initial state: {e}"),
        })?;

    let dedup = policy.dedup == DedupPolicy::StateIdentity;
    let record = policy.record_graph;
    let max_frontier = usize::try_from(policy.max_frontier_size).unwrap_or(usize::MAX);

    let mut frontier = BestFirstFrontier::new();
    let mut traces: Vec<NodeTrace> = Vec::new();
    let mut expansions: Vec<ExpandEvent> = Vec::new();
    let mut stats = SearchStats::default();
    let mut next_node_id: u64 = 0;

    let root_fp = state_fingerprint(initial);
    let root_fp_hex = root_fp.hex_digest().to_string();
    debug!(
        actions = library.len(),
        max_expansions = policy.max_expansions,
        dedup = policy.dedup.as_str(),
        root = %root_fp_hex,
        "search start"
    );

    let root_h = guarded(|| "heuristic".to_string(), || heuristic.estimate(initial))?;
    frontier.push(SearchNode {
        node_id: next_node_id,
        parent_id: None,
        state: initial.clone(),
        state_fingerprint: root_fp,
        depth: 0,
        g_cost: 0,
        h_cost: root_h,
        creation_order: next_node_id,
        producing_action: None,
    });
    traces.push(NodeTrace {
        parent_id: None,
        producing_action: None,
        step_cost: 0,
    });
    next_node_id += 1;

    let termination = loop {
        if cancel.load(Ordering::Relaxed) {
            break TerminationReason::Cancelled;
        }

        let Some(current) = frontier.pop() else {
            break if stats.pruned {
                TerminationReason::FrontierBudgetExceeded
            } else {
                TerminationReason::FrontierExhausted
            };
        };
        let current_fp_hex = current.state_fingerprint.hex_digest().to_string();

        // A state reached along several paths sits in the frontier several
        // times; only its cheapest entry pops first.
        if dedup && !frontier.close(&current_fp_hex) {
            stats.stale_pops += 1;
            continue;
        }

        if policy.max_cost.is_some_and(|max| current.f_cost() > max) {
            break TerminationReason::CostBudgetExceeded;
        }

        if guarded(|| "goal".to_string(), || goal.is_goal(&current.state))? {
            break TerminationReason::GoalReached {
                node_id: current.node_id,
            };
        }

        if stats.expansions >= policy.max_expansions {
            break TerminationReason::ExpansionBudgetExceeded;
        }

        let pop_key = FrontierKey::from(&current);
        let mut candidates = Vec::new();

        for (action_index, action) in library.iter().enumerate() {
            let expanded = guarded(
                || format!("action `{}`", action.name()),
                || expand_one(action, &current.state),
            )?;
            let outcome = match expanded {
                Ok(Some(next)) => {
                    let child_fp = state_fingerprint(&next);
                    if dedup && frontier.is_closed(child_fp.hex_digest()) {
                        stats.duplicates_suppressed += 1;
                        CandidateOutcome::DuplicateSuppressed {
                            fingerprint: child_fp.hex_digest().to_string(),
                        }
                    } else {
                        let step_cost = guarded(
                            || format!("cost of action `{}`", action.name()),
                            || action.cost(&current.state),
                        )?;
                        let h_cost =
                            guarded(|| "heuristic".to_string(), || heuristic.estimate(&next))?;
                        let child = SearchNode {
                            node_id: next_node_id,
                            parent_id: Some(current.node_id),
                            h_cost,
                            state: next,
                            state_fingerprint: child_fp,
                            depth: current.depth + 1,
                            g_cost: current.g_cost.saturating_add(step_cost),
                            creation_order: next_node_id,
                            producing_action: Some(action_index),
                        };
                        traces.push(NodeTrace {
                            parent_id: Some(current.node_id),
                            producing_action: Some(action_index),
                            step_cost,
                        });
                        frontier.push(child);
                        stats.nodes_generated += 1;
                        next_node_id += 1;
                        CandidateOutcome::Applied {
                            to_node: next_node_id - 1,
                            cost: step_cost,
                        }
                    }
                }
                Ok(None) => CandidateOutcome::NotLegal,
                Err(e) if e.is_recoverable() => CandidateOutcome::OutOfBounds,
                Err(e) => {
                    warn!(
                        node_id = current.node_id,
                        action = action.name(),
                        error = %e,
                        "search aborted on malformed state"
                    );
                    return Err(SearchError::MalformedState {
                        detail: e.to_string(),
                    });
                }
            };
            if record {
                candidates.push(CandidateRecord {
                    action_index,
                    action_name: action.name().to_string(),
                    outcome,
                });
            }
        }

        let mut notes = Vec::new();
        if frontier.len() > max_frontier {
            let pruned_node_ids = frontier.prune_to(max_frontier);
            stats.pruned = true;
            trace!(pruned = pruned_node_ids.len(), "frontier pruned");
            if record {
                notes.push(ExpansionNote::FrontierPruned { pruned_node_ids });
            }
        }

        trace!(
            expansion = stats.expansions,
            node_id = current.node_id,
            f_cost = pop_key.f_cost,
            frontier = frontier.len(),
            "expanded"
        );

        if record {
            expansions.push(ExpandEvent {
                expansion_order: stats.expansions,
                node_id: current.node_id,
                state_fingerprint: current_fp_hex,
                pop_key,
                candidates,
                notes,
            });
        }
        stats.expansions += 1;
    };

    stats.frontier_high_water = frontier.high_water();

    let outcome = match termination {
        TerminationReason::GoalReached { node_id } => {
            SearchOutcome::Found(reconstruct_plan(&traces, node_id, library))
        }
        TerminationReason::FrontierExhausted => SearchOutcome::NoPlanFound,
        TerminationReason::ExpansionBudgetExceeded => SearchOutcome::SearchExhausted {
            budget: BudgetKind::Expansions,
        },
        TerminationReason::CostBudgetExceeded => SearchOutcome::SearchExhausted {
            budget: BudgetKind::Cost,
        },
        TerminationReason::FrontierBudgetExceeded => SearchOutcome::SearchExhausted {
            budget: BudgetKind::Frontier,
        },
        TerminationReason::Cancelled => SearchOutcome::Cancelled,
    };

    debug!(
        ?termination,
        expansions = stats.expansions,
        generated = stats.nodes_generated,
        duplicates = stats.duplicates_suppressed,
        high_water = stats.frontier_high_water,
        "search end"
    );

    let graph = if record {
        Some(SearchGraph {
            expansions,
            metadata: SearchGraphMetadata {
                root_state_fingerprint: root_fp_hex,
                library_digest: library.digest().as_str().to_string(),
                policy_digest: policy.digest()?.as_str().to_string(),
                stats,
                termination_reason: termination,
            },
        })
    } else {
        None
    };

    Ok(SearchResult {
        outcome,
        stats,
        graph,
    })
}

/// Run a caller-supplied callback; a panic inside it ends the search with
/// [`SearchError::MalformedState`] instead of unwinding through the caller.
fn guarded<T>(what: impl FnOnce() -> String, f: impl FnOnce() -> T) -> Result<T, SearchError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_default();
        let detail = format!("{} panicked: {message}", what());
        warn!(%detail, "search aborted on panic");
        SearchError::MalformedState { detail }
    })
}

/// Legality check followed by application, the order the loop requires.
/// `Ok(None)` means "not legal here".
fn expand_one<E: Entity>(
    action: &Action<E>,
    state: &EditState<E>,
) -> Result<Option<EditState<E>>, ActionError> {
    if !action.is_legal(state)? {
        return Ok(None);
    }
    action.apply(state).map(Some)
}

/// Walk parent links from the goal node back to the root.
fn reconstruct_plan<E: Entity>(
    traces: &[NodeTrace],
    goal_node_id: u64,
    library: &ActionLibrary<E>,
) -> Plan {
    let mut steps = Vec::new();
    let mut total_cost: u64 = 0;
    let mut current = Some(goal_node_id);

    while let Some(trace) = current
        .and_then(|id| usize::try_from(id).ok())
        .and_then(|i| traces.get(i))
    {
        if let Some(action_index) = trace.producing_action {
            steps.push(PlanStep {
                action_index,
                action_name: library
                    .get(action_index)
                    .map(|a| a.name().to_string())
                    .unwrap_or_default(),
                cost: trace.step_cost,
            });
            total_cost = total_cost.saturating_add(trace.step_cost);
        }
        current = trace.parent_id;
    }

    steps.reverse();
    Plan { steps, total_cost }
}
