//! Shared test utilities used across kindred crates.

pub mod fixtures;
pub mod trace;
