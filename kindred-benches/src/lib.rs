//! Benchmark support crate for kindred.
//!
//! Provides seeded synthetic social networks and parameter types used by
//! Criterion benchmarks for path search, neighbourhood queries and link
//! sampling.

pub mod error;
pub mod params;
pub mod source;
