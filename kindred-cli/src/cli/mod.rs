//! Command-line interface orchestration for kindred.
//!
//! Each invocation loads one roster file into a [`kindred_core::SocialNetwork`]
//! and runs a single query against it.

mod commands;
mod dot;
mod roster;

pub use commands::{
    Cli, CliError, Command, DotArgs, ExecutionSummary, PairArgs, PathArgs, QueryOutcome,
    SampleArgs, UserArgs, render_summary, run_cli, run_query,
};
pub use dot::write_dot;
pub use roster::load_roster;

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
