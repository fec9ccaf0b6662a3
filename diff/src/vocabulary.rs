//! The structural-diff action vocabulary.
//!
//! A diff state holds two lists. [`WORKING`] starts as the source sequence
//! and is the only list any action edits; [`REFERENCE`] holds the target
//! sequence and never changes. The working cursor `c` marks how much of the
//! reference prefix is already matched: every entity left of `c` equals the
//! reference entity at the same position.
//!
//! | Action    | Legal when                                  | Effect                          | Cost |
//! |-----------|---------------------------------------------|---------------------------------|------|
//! | `keep`    | `W[c] == R[c]`                              | `c += 1`                        | 0    |
//! | `insert`  | `c < len(R)`                                | insert `R[c]` at `c`, `c += 1`  | 1    |
//! | `remove`  | `c < len(W)`                                | remove `W[c]`                   | 1    |
//! | `replace` | `W[c] != R[c]` (both exist)                 | `W[c] = R[c]`, `c += 1`         | 1    |
//! | `reorder` | `W[c] != R[c]`, some `j > c` has `W[j] == R[c]` | move first such `W[j]` to `c`, `c += 1` | 1 adjacent, 2 otherwise |
//!
//! Every action either advances the cursor or shrinks the working list, so
//! the state graph is acyclic and finite.
//!
//! Conditions read positions through slice lookups rather than the
//! bound-checked accessors, so they evaluate cleanly on any successor.

use graft_kernel::carrier::entity::Entity;
use graft_kernel::carrier::entity_list::EntityList;
use graft_kernel::carrier::error::StateError;
use graft_kernel::carrier::state::{EditState, ListId};
use graft_search::action::Action;
use graft_search::heuristic::Heuristic;
use graft_search::library::ActionLibrary;
use graft_search::predicate::{Condition, Effect};

/// The list being edited.
pub const WORKING: ListId = ListId(0);
/// The desired sequence. Never targeted by an action.
pub const REFERENCE: ListId = ListId(1);

/// The five diff actions, in library order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffAction {
    Keep,
    Insert,
    Remove,
    Replace,
    Reorder,
}

impl DiffAction {
    /// Library order. Changing it changes tie-breaking between equal-cost plans.
    pub const ALL: [Self; 5] = [
        Self::Keep,
        Self::Insert,
        Self::Remove,
        Self::Replace,
        Self::Reorder,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Insert => "insert",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Reorder => "reorder",
        }
    }

    /// The action at a [`diff_library`] index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Build the executable action.
    #[must_use]
    pub fn action<E: Entity>(self) -> Action<E> {
        match self {
            Self::Keep => keep(),
            Self::Insert => insert(),
            Self::Remove => remove(),
            Self::Replace => replace(),
            Self::Reorder => reorder(),
        }
    }
}

/// The diff vocabulary as a planner library, in [`DiffAction::ALL`] order.
#[must_use]
pub fn diff_library<E: Entity>() -> ActionLibrary<E> {
    DiffAction::ALL.iter().map(|a| a.action()).collect()
}

/// Initial diff state: `source` in [`WORKING`], `target` in [`REFERENCE`],
/// both cursors at 0.
///
/// # Errors
///
/// Never fails for two lists; the `Result` mirrors [`EditState::new`].
pub fn diff_state<E: Entity>(source: Vec<E>, target: Vec<E>) -> Result<EditState<E>, StateError> {
    EditState::new(vec![EntityList::new(source), EntityList::new(target)])
}

/// Goal test: the working entities equal the reference entities. The cursor
/// is ignored.
#[must_use]
pub fn lists_match<E: Entity>(state: &EditState<E>) -> bool {
    match (state.list(WORKING), state.list(REFERENCE)) {
        (Ok(w), Ok(r)) => w.entities() == r.entities(),
        _ => false,
    }
}

/// `|len(W) - len(R)|`. Only insert and remove change the working length,
/// one entity per unit of cost, so this never overestimates and drops by at
/// most the cost of any step.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthGapHeuristic;

impl<E: Entity> Heuristic<E> for LengthGapHeuristic {
    fn estimate(&self, state: &EditState<E>) -> u64 {
        match (state.list(WORKING), state.list(REFERENCE)) {
            (Ok(w), Ok(r)) => w.len().abs_diff(r.len()) as u64,
            _ => 0,
        }
    }
}

/// The entities under the working cursor in each list, if present.
fn heads<E: Entity>(state: &EditState<E>) -> Result<(Option<&E>, Option<&E>), StateError> {
    let w = state.list(WORKING)?;
    let r = state.list(REFERENCE)?;
    let c = w.cursor();
    Ok((w.entities().get(c), r.entities().get(c)))
}

/// Position of the first working entity after the cursor that equals the
/// reference entity at the cursor.
pub(crate) fn later_match<E: Entity>(state: &EditState<E>) -> Result<Option<usize>, StateError> {
    let w = state.list(WORKING)?;
    let r = state.list(REFERENCE)?;
    let c = w.cursor();
    let Some(wanted) = r.entities().get(c) else {
        return Ok(None);
    };
    Ok(w.entities()
        .iter()
        .enumerate()
        .skip(c + 1)
        .find(|(_, e)| *e == wanted)
        .map(|(j, _)| j))
}

fn heads_differ<E: Entity>() -> Condition<E> {
    Condition::new("W[c] != R[c]", |s: &EditState<E>| {
        Ok(matches!(heads(s)?, (Some(w), Some(r)) if w != r))
    })
}

fn advance<E: Entity>() -> Effect<E> {
    Effect::new("c += 1", |s: &mut EditState<E>| {
        s.list_mut(WORKING)?.advance_cursor()
    })
}

fn keep<E: Entity>() -> Action<E> {
    Action::new(DiffAction::Keep.name(), WORKING)
        .with_condition(Condition::new("W[c] == R[c]", |s: &EditState<E>| {
            Ok(matches!(heads(s)?, (Some(w), Some(r)) if w == r))
        }))
        .with_effect(advance())
        .with_cost(0)
}

fn insert<E: Entity>() -> Action<E> {
    Action::new(DiffAction::Insert.name(), WORKING)
        .with_condition(Condition::new("c < len(R)", |s: &EditState<E>| {
            Ok(heads(s)?.1.is_some())
        }))
        .with_effect(Effect::new("insert R[c] at c", |s: &mut EditState<E>| {
            let c = s.list(WORKING)?.cursor();
            let entity = s.list(REFERENCE)?.get(c)?.clone();
            s.list_mut(WORKING)?.insert_at_cursor(entity);
            Ok(())
        }))
        .with_effect(advance())
        .with_cost(1)
}

fn remove<E: Entity>() -> Action<E> {
    Action::new(DiffAction::Remove.name(), WORKING)
        .with_condition(Condition::new("c < len(W)", |s: &EditState<E>| {
            Ok(heads(s)?.0.is_some())
        }))
        .with_effect(Effect::new("remove W[c]", |s: &mut EditState<E>| {
            s.list_mut(WORKING)?.remove_at_cursor().map(drop)
        }))
        .with_cost(1)
}

fn replace<E: Entity>() -> Action<E> {
    Action::new(DiffAction::Replace.name(), WORKING)
        .with_condition(heads_differ())
        .with_effect(Effect::new("W[c] = R[c]", |s: &mut EditState<E>| {
            let c = s.list(WORKING)?.cursor();
            let entity = s.list(REFERENCE)?.get(c)?.clone();
            s.list_mut(WORKING)?.replace_at_cursor(entity).map(drop)
        }))
        .with_effect(advance())
        .with_cost(1)
}

fn reorder<E: Entity>() -> Action<E> {
    Action::new(DiffAction::Reorder.name(), WORKING)
        .with_condition(heads_differ())
        .with_condition(Condition::new("R[c] occurs in W after c", |s: &EditState<E>| {
            Ok(later_match(s)?.is_some())
        }))
        .with_effect(Effect::new("move W[j] to c", |s: &mut EditState<E>| {
            let j = later_match(s)?.ok_or_else(|| StateError::EffectFailed {
                detail: "no later match to move".into(),
            })?;
            let w = s.list_mut(WORKING)?;
            let c = w.cursor();
            w.move_entity(j, c)
        }))
        .with_effect(advance())
        .with_cost_fn(|s: &EditState<E>| {
            let adjacent = s
                .list(WORKING)
                .ok()
                .zip(later_match(s).ok().flatten())
                .is_some_and(|(w, j)| j == w.cursor() + 1);
            if adjacent {
                1
            } else {
                2
            }
        })
}
