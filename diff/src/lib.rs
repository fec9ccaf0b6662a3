//! Graft Diff: structural diff of two entity sequences by optimal edit planning.
//!
//! The planner in `graft_search` is vocabulary-agnostic. This crate supplies
//! the vocabulary that makes it a diff engine: a two-list state (the working
//! copy being edited and the reference it should become), five cursor-driven
//! actions, an admissible heuristic, and a runner that turns the found plan
//! into an [`EditScript`](script::EditScript) a code generator can replay.
//!
//! # Key types
//!
//! - [`CodeEntity`](entity::CodeEntity) -- representative program entity
//! - [`diff_library`](vocabulary::diff_library) -- keep / insert / remove / replace / reorder
//! - [`plan_edits`](runner::plan_edits) -- the diff entry point
//! - [`EditScript`](script::EditScript) -- positional edit operations

#![forbid(unsafe_code)]

pub mod entity;
pub mod error;
pub mod runner;
pub mod script;
pub mod vocabulary;
