//! Shared fixtures and oracles for the cross-crate lock tests.

pub mod oracle;
