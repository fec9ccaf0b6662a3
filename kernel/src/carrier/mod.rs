//! Carrier module: entities, entity lists, and the edit state.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod entity;
pub mod entity_list;
pub mod error;
pub mod state;
