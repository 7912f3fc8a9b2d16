//! Kindred core library.
//!
//! Answers relationship queries over a social graph of confirmed friendships
//! and samples probabilistic links between users from an injected random
//! source.

mod error;
mod graph;
mod links;
mod network;
mod random;
mod shared;

pub use crate::{
    error::{EdgeRejection, KindredError, KindredErrorCode, Result},
    graph::{ConnectionGraph, ConnectionPath, GraphInvariantViolation},
    links::{ConnectivityEstimate, Probability, ProbabilisticLinkTable},
    network::SocialNetwork,
    random::{RngSource, ScriptedSource, UniformSource},
    shared::SharedNetwork,
};
