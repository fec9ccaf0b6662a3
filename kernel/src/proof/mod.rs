//! Proof module: canonical hashing and canonical JSON.
//!
//! Depends on nothing in `carrier` except the bytes it is handed.

pub mod canon;
pub mod hash;
pub mod hash_domain;
