//! Thread-safe handle over a [`SocialNetwork`].
//!
//! Mutations take the write lock; queries take the read lock and return owned
//! results so no guard escapes the call.

use std::{
    collections::BTreeSet,
    fmt,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::warn;

use crate::{
    error::{KindredError, Result},
    graph::ConnectionPath,
    network::SocialNetwork,
    random::UniformSource,
};

const RESOURCE: &str = "social network";

/// A [`SocialNetwork`] guarded by a reader-writer lock.
///
/// Share it across threads behind an [`std::sync::Arc`] or borrow it from
/// scoped threads.
#[derive(Debug)]
pub struct SharedNetwork<V> {
    inner: RwLock<SocialNetwork<V>>,
}

impl<V> Default for SharedNetwork<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SharedNetwork<V> {
    /// Creates an empty shared network.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_network(SocialNetwork::new())
    }

    /// Wraps an existing network.
    #[must_use]
    pub const fn from_network(network: SocialNetwork<V>) -> Self {
        Self {
            inner: RwLock::new(network),
        }
    }

    /// Consumes the handle and returns the wrapped network.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] when a writer panicked.
    pub fn into_inner(self) -> Result<SocialNetwork<V>> {
        self.inner.into_inner().map_err(|_| poisoned())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SocialNetwork<V>>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SocialNetwork<V>>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl<V> From<SocialNetwork<V>> for SharedNetwork<V> {
    fn from(network: SocialNetwork<V>) -> Self {
        Self::from_network(network)
    }
}

fn poisoned() -> KindredError {
    warn!(resource = RESOURCE, "lock poisoned");
    KindredError::LockPoisoned { resource: RESOURCE }
}

impl<V: Clone + Ord + fmt::Debug> SharedNetwork<V> {
    /// Returns a copy of the current network state.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] when a writer panicked.
    pub fn snapshot(&self) -> Result<SocialNetwork<V>> {
        Ok(self.read()?.clone())
    }

    /// Records a confirmed friendship.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or the error from
    /// [`SocialNetwork::add_connection`].
    pub fn add_connection(&self, left: V, right: V) -> Result<()> {
        self.write()?.add_connection(left, right)
    }

    /// Records or overwrites a probabilistic link.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or the error from
    /// [`SocialNetwork::add_probabilistic_connection`].
    pub fn add_probabilistic_connection(&self, left: V, right: V, probability: f64) -> Result<()> {
        self.write()?
            .add_probabilistic_connection(left, right, probability)
    }

    /// Reports whether `vertex` has a confirmed connection.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] when a writer panicked.
    pub fn has_vertex(&self, vertex: &V) -> Result<bool> {
        Ok(self.read()?.has_vertex(vertex))
    }

    /// Returns a copy of the neighbour set of `vertex`.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or
    /// [`KindredError::UnknownVertex`].
    pub fn neighbors(&self, vertex: &V) -> Result<BTreeSet<V>> {
        self.read()?.neighbors(vertex).cloned()
    }

    /// Returns the number of confirmed friends of `vertex`.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or
    /// [`KindredError::UnknownVertex`].
    pub fn degree(&self, vertex: &V) -> Result<usize> {
        self.read()?.degree(vertex)
    }

    /// Returns the friends shared by `left` and `right`.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or
    /// [`KindredError::UnknownVertex`].
    pub fn mutual_friends(&self, left: &V, right: &V) -> Result<BTreeSet<V>> {
        self.read()?.mutual_friends(left, right)
    }

    /// Returns the vertices exactly two hops from `vertex`.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or
    /// [`KindredError::UnknownVertex`].
    pub fn friends_of_friends(&self, vertex: &V) -> Result<BTreeSet<V>> {
        self.read()?.friends_of_friends(vertex)
    }

    /// Finds a shortest confirmed path of at most `max_depth` hops.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] or
    /// [`KindredError::UnknownVertex`].
    pub fn find_path(
        &self,
        start: &V,
        end: &V,
        max_depth: usize,
    ) -> Result<Option<ConnectionPath<V>>> {
        self.read()?.find_path(start, end, max_depth)
    }

    /// Returns the stored link probability, or `0.0` when absent.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] when a writer panicked.
    pub fn get_probability(&self, left: &V, right: &V) -> Result<f64> {
        Ok(self.read()?.get_probability(left, right))
    }

    /// Samples whether the probabilistic link between the pair is present.
    ///
    /// # Errors
    /// Returns [`KindredError::LockPoisoned`] when a writer panicked.
    pub fn sample_connected<S: UniformSource + ?Sized>(
        &self,
        left: &V,
        right: &V,
        source: &mut S,
    ) -> Result<bool> {
        Ok(self.read()?.sample_connected(left, right, source))
    }
}
