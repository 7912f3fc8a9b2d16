//! Synthetic social networks for benchmarking.
//!
//! Users are numbered `0..users`. Every user proposes a fixed number of
//! friendships to uniformly chosen peers and one probabilistic link with a
//! uniformly drawn probability. Generation is seeded so every benchmark run
//! sees the same network.

use kindred_core::{KindredError, SocialNetwork};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::params::NetworkBenchParams;

/// Errors that may occur during synthetic network generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// Fewer than two users were requested, so no friendship can exist.
    #[error("at least two users are required, got {users}")]
    TooFewUsers {
        /// Requested user count.
        users: u32,
    },
    /// No friendships were requested per user.
    #[error("friends per user must be greater than zero")]
    ZeroFriends,
    /// The network rejected a generated edge or link.
    #[error("generated relationship was rejected: {0}")]
    Rejected(#[from] KindredError),
}

/// Configuration for synthetic network generation.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Network shape.
    pub shape: NetworkBenchParams,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A seeded random social network.
///
/// # Examples
///
/// ```
/// use kindred_benches::{
///     params::NetworkBenchParams,
///     source::{SyntheticConfig, SyntheticNetwork},
/// };
///
/// let config = SyntheticConfig {
///     shape: NetworkBenchParams { users: 50, friends_per_user: 3 },
///     seed: 42,
/// };
/// let network = SyntheticNetwork::generate(&config).expect("valid config");
/// assert!(network.network().connections().vertex_count() <= 50);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticNetwork {
    network: SocialNetwork<u32>,
    users: u32,
}

impl SyntheticNetwork {
    /// Generates the network eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::TooFewUsers`] for fewer than two users and
    /// [`SyntheticError::ZeroFriends`] when no friendships are requested.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let NetworkBenchParams {
            users,
            friends_per_user,
        } = config.shape;
        if users < 2 {
            return Err(SyntheticError::TooFewUsers { users });
        }
        if friends_per_user == 0 {
            return Err(SyntheticError::ZeroFriends);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut network = SocialNetwork::new();
        for user in 0..users {
            for _ in 0..friends_per_user {
                let peer = distinct_peer(&mut rng, user, users);
                network.add_connection(user, peer)?;
            }
            let peer = distinct_peer(&mut rng, user, users);
            let probability: f64 = rng.gen_range(0.0..=1.0);
            network.add_probabilistic_connection(user, peer, probability)?;
        }

        Ok(Self { network, users })
    }

    /// Returns the generated network.
    #[must_use]
    pub const fn network(&self) -> &SocialNetwork<u32> {
        &self.network
    }

    /// Returns the number of user identifiers drawn from.
    #[must_use]
    pub const fn users(&self) -> u32 {
        self.users
    }

    /// Returns a user with at least one confirmed friendship, preferring
    /// `preferred` when it has one.
    #[must_use]
    pub fn connected_user(&self, preferred: u32) -> Option<u32> {
        let connections = self.network.connections();
        if connections.has_vertex(&preferred) {
            return Some(preferred);
        }
        connections.vertices().next().copied()
    }
}

fn distinct_peer(rng: &mut SmallRng, user: u32, users: u32) -> u32 {
    // Draw from the other `users - 1` identifiers, skipping over `user`.
    let offset = rng.gen_range(1..users);
    let shifted = user.saturating_add(offset);
    if shifted >= users {
        shifted.saturating_sub(users)
    } else {
        shifted
    }
}
