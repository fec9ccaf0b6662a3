//! Graft Search: deterministic A* planning over entity-list edit states.
//!
//! This crate depends only on `graft_kernel`. Concrete edit vocabularies
//! (such as the structural diff in `graft_diff`) build on it.
//!
//! # Crate dependency graph
//!
//! ```text
//! graft_kernel  ←  graft_search  ←  graft_diff
//! (state, hash)    (actions, A*)    (diff vocabulary, runner)
//! ```
//!
//! # Key types
//!
//! - [`Condition`](predicate::Condition) / [`Effect`](predicate::Effect) -- named predicate records
//! - [`Action`](action::Action) -- a costed, targeted unit of change
//! - [`ActionLibrary`](library::ActionLibrary) -- the ordered, read-only action set
//! - [`Goal`](contract::Goal) / [`Heuristic`](heuristic::Heuristic) -- search contracts
//! - [`SearchPolicy`](policy::SearchPolicy) -- budgets and dedup configuration
//! - [`plan`](search::plan) -- the planner entry point
//! - [`Plan`](plan::Plan) -- the replayable result

#![forbid(unsafe_code)]

pub mod action;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod library;
pub mod node;
pub mod plan;
pub mod policy;
pub mod predicate;
pub mod search;
