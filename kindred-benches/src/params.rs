//! Benchmark parameter types.

use std::fmt;

/// Shape of a synthetic network.
#[derive(Clone, Copy, Debug)]
pub struct NetworkBenchParams {
    /// Number of users in the network.
    pub users: u32,
    /// Friendships proposed per user.
    pub friends_per_user: u32,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.users, self.friends_per_user)
    }
}

/// Parameters for a bounded path search benchmark.
#[derive(Clone, Copy, Debug)]
pub struct PathBenchParams {
    /// Network shape.
    pub network: NetworkBenchParams,
    /// Depth ceiling passed to the search.
    pub max_depth: usize,
}

impl fmt::Display for PathBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},depth={}", self.network, self.max_depth)
    }
}
