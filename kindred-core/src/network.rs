//! Combined store pairing confirmed friendships with probabilistic links.

use std::{collections::BTreeSet, fmt};

use crate::{
    error::Result,
    graph::{ConnectionGraph, ConnectionPath},
    links::ProbabilisticLinkTable,
    random::UniformSource,
};

/// Both relationship stores over one user identifier space.
///
/// Each query is answered by exactly one of the stores; confirmed-edge
/// queries never consult the link table and vice versa.
///
/// # Examples
/// ```
/// use kindred_core::{RngSource, SocialNetwork};
///
/// let mut network = SocialNetwork::new();
/// network.add_connection("alice", "bob")?;
/// network.add_probabilistic_connection("alice", "carol", 0.4)?;
///
/// assert_eq!(network.degree(&"alice")?, 1);
/// assert_eq!(network.get_probability(&"carol", &"alice"), 0.4);
/// // Probabilistic links do not create confirmed vertices.
/// assert!(!network.has_vertex(&"carol"));
///
/// let _ = network.sample_connected(&"alice", &"carol", &mut RngSource::seeded(11));
/// # Ok::<(), kindred_core::KindredError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SocialNetwork<V> {
    connections: ConnectionGraph<V>,
    links: ProbabilisticLinkTable<V>,
}

impl<V> Default for SocialNetwork<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SocialNetwork<V> {
    /// Creates an empty network.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connections: ConnectionGraph::new(),
            links: ProbabilisticLinkTable::new(),
        }
    }

    /// Returns the confirmed-friendship store.
    #[must_use]
    pub const fn connections(&self) -> &ConnectionGraph<V> {
        &self.connections
    }

    /// Returns the probabilistic-link store.
    #[must_use]
    pub const fn links(&self) -> &ProbabilisticLinkTable<V> {
        &self.links
    }
}

impl<V: Clone + Ord + fmt::Debug> SocialNetwork<V> {
    /// See [`ConnectionGraph::add_connection`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::InvalidEdge`] for self-loops.
    pub fn add_connection(&mut self, left: V, right: V) -> Result<()> {
        self.connections.add_connection(left, right)
    }

    /// See [`ProbabilisticLinkTable::set_probability`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::InvalidProbability`] and
    /// [`crate::KindredError::InvalidEdge`].
    pub fn add_probabilistic_connection(
        &mut self,
        left: V,
        right: V,
        probability: f64,
    ) -> Result<()> {
        self.links.set_probability(left, right, probability)
    }

    /// See [`ConnectionGraph::has_vertex`].
    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.connections.has_vertex(vertex)
    }

    /// See [`ConnectionGraph::neighbors`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::UnknownVertex`].
    pub fn neighbors(&self, vertex: &V) -> Result<&BTreeSet<V>> {
        self.connections.neighbors(vertex)
    }

    /// See [`ConnectionGraph::degree`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::UnknownVertex`].
    pub fn degree(&self, vertex: &V) -> Result<usize> {
        self.connections.degree(vertex)
    }

    /// See [`ConnectionGraph::mutual_friends`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::UnknownVertex`].
    pub fn mutual_friends(&self, left: &V, right: &V) -> Result<BTreeSet<V>> {
        self.connections.mutual_friends(left, right)
    }

    /// See [`ConnectionGraph::friends_of_friends`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::UnknownVertex`].
    pub fn friends_of_friends(&self, vertex: &V) -> Result<BTreeSet<V>> {
        self.connections.friends_of_friends(vertex)
    }

    /// See [`ConnectionGraph::find_path`].
    ///
    /// # Errors
    /// Propagates [`crate::KindredError::UnknownVertex`].
    pub fn find_path(
        &self,
        start: &V,
        end: &V,
        max_depth: usize,
    ) -> Result<Option<ConnectionPath<V>>> {
        self.connections.find_path(start, end, max_depth)
    }

    /// See [`ProbabilisticLinkTable::get_probability`].
    #[must_use]
    pub fn get_probability(&self, left: &V, right: &V) -> f64 {
        self.links.get_probability(left, right)
    }

    /// See [`ProbabilisticLinkTable::sample_connected`].
    pub fn sample_connected<S: UniformSource + ?Sized>(
        &self,
        left: &V,
        right: &V,
        source: &mut S,
    ) -> bool {
        self.links.sample_connected(left, right, source)
    }
}
