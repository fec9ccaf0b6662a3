//! Graft Kernel: the state model and canonical hashing for structural-edit planning.
//!
//! # API Surface
//!
//! - [`carrier::entity_list::EntityList`] -- an ordered entity sequence with a cursor
//! - [`carrier::state::EditState`] -- a fixed-size collection of entity lists
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `proof`
//!
//! One-way only. `proof` hashes bytes produced by `carrier`; `carrier` depends
//! on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
