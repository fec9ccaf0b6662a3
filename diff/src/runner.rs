//! Diff runner: plan the cheapest edit from one entity sequence to another.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::state::EditState;
use graft_search::action::ActionError;
use graft_search::graph::{SearchGraph, SearchStats};
use graft_search::library::ActionLibrary;
use graft_search::plan::Plan;
use graft_search::policy::{PolicyConfig, SearchPolicy};
use graft_search::search::{plan, SearchOutcome};
use tracing::debug;

use crate::error::DiffError;
use crate::script::{EditOp, EditScript};
use crate::vocabulary::{
    diff_library, diff_state, later_match, lists_match, DiffAction, LengthGapHeuristic, REFERENCE,
    WORKING,
};

/// Everything a diff run produced.
#[derive(Debug, Clone)]
pub struct EditReport<E> {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    /// Present when a plan was found.
    pub script: Option<EditScript<E>>,
    /// The working sequence after replaying the plan; equals the target.
    pub edited: Option<Vec<E>>,
    /// Audit graph, only when the config set `record_graph: true`.
    pub graph: Option<SearchGraph>,
}

impl<E> EditReport<E> {
    /// Plan cost, when a plan was found.
    #[must_use]
    pub fn cost(&self) -> Option<u64> {
        self.script.as_ref().map(|s| s.total_cost)
    }
}

/// Plan the cheapest edit script turning `source` into `target`.
///
/// `config` overrides the default search budget. A budget too small for the
/// inputs yields a report whose outcome is `SearchExhausted` and whose script
/// is `None`; that is not an error.
///
/// Unlike a bare search, the diff does not record an audit graph unless
/// `config.record_graph` is `Some(true)`. Recording keeps a candidate record
/// per action per expansion and digests the graph at the end.
///
/// # Errors
///
/// - [`DiffError::Search`] for an invalid policy, or a malformed state during search
/// - [`DiffError::Replay`] / [`DiffError::State`] if the found plan does not
///   replay (a vocabulary bug)
pub fn plan_edits<E: Entity>(
    source: &[E],
    target: &[E],
    config: &PolicyConfig,
) -> Result<EditReport<E>, DiffError> {
    let policy = diff_policy(config)?;
    let initial = diff_state(source.to_vec(), target.to_vec())?;
    let library = diff_library::<E>();

    let result = plan(
        &initial,
        &lists_match::<E>,
        &library,
        &LengthGapHeuristic,
        &policy,
    )?;

    let (script, edited) = match &result.outcome {
        SearchOutcome::Found(found) => {
            let (script, end) = script_from_plan(found, &library, &initial)?;
            let edited = end.list(WORKING)?.entities().to_vec();
            (Some(script), Some(edited))
        }
        _ => (None, None),
    };

    debug!(
        source_len = source.len(),
        target_len = target.len(),
        outcome = ?result.outcome,
        expansions = result.stats.expansions,
        "diff planned"
    );

    Ok(EditReport {
        outcome: result.outcome,
        stats: result.stats,
        script,
        edited,
        graph: result.graph,
    })
}

/// Resolve `config` for a diff run: graph recording is off unless asked for.
fn diff_policy(config: &PolicyConfig) -> Result<SearchPolicy, DiffError> {
    let mut policy = config.resolve()?;
    if config.record_graph.is_none() {
        policy.record_graph = false;
    }
    Ok(policy)
}

/// Replay `found` step by step, reading each step's positions and entities
/// off the state it is taken from.
fn script_from_plan<E: Entity>(
    found: &Plan,
    library: &ActionLibrary<E>,
    initial: &EditState<E>,
) -> Result<(EditScript<E>, EditState<E>), DiffError> {
    let mut state = initial.clone();
    let mut ops = Vec::with_capacity(found.len());

    for step in &found.steps {
        let kind = DiffAction::from_index(step.action_index).ok_or_else(|| {
            DiffError::ScriptMismatch {
                op_index: ops.len(),
                detail: format!("unknown diff action index {}", step.action_index),
            }
        })?;
        let w = state.list(WORKING)?;
        let index = w.cursor();
        let op = match kind {
            DiffAction::Keep => EditOp::Keep { index },
            DiffAction::Insert => EditOp::Insert {
                index,
                entity: state.list(REFERENCE)?.get(index)?.clone(),
            },
            DiffAction::Remove => EditOp::Remove {
                index,
                entity: w.get(index)?.clone(),
            },
            DiffAction::Replace => EditOp::Replace {
                index,
                old: w.get(index)?.clone(),
                new: state.list(REFERENCE)?.get(index)?.clone(),
            },
            DiffAction::Reorder => EditOp::Reorder {
                from: later_match(&state)?.ok_or_else(|| DiffError::ScriptMismatch {
                    op_index: ops.len(),
                    detail: "reorder without a later match".into(),
                })?,
                to: index,
            },
        };
        ops.push(op);

        let action = library
            .get(step.action_index)
            .ok_or(ActionError::UnknownAction {
                index: step.action_index,
            })?;
        state = action.apply(&state)?;
    }

    Ok((
        EditScript {
            ops,
            total_cost: found.total_cost,
        },
        state,
    ))
}
