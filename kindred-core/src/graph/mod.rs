//! Confirmed friendships stored as an undirected adjacency map.
//!
//! Vertices come into existence with their first edge; there is no separate
//! registration step and no removal. Neighbour sets are kept sorted so every
//! traversal, including path search, enumerates vertices in a canonical order
//! and produces the same answer across runs.

mod invariants;
mod path;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::Bound,
};

use tracing::{debug, trace};

use crate::error::{KindredError, Result};

pub use self::{invariants::GraphInvariantViolation, path::ConnectionPath};

/// Undirected graph of confirmed connections between users.
///
/// # Examples
/// ```
/// use kindred_core::ConnectionGraph;
///
/// let mut graph = ConnectionGraph::new();
/// graph.add_connection("alice", "bob")?;
/// graph.add_connection("bob", "carol")?;
///
/// assert_eq!(graph.degree(&"bob")?, 2);
/// assert!(graph.neighbors(&"carol")?.contains(&"bob"));
/// # Ok::<(), kindred_core::KindredError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionGraph<V> {
    adjacency: BTreeMap<V, BTreeSet<V>>,
}

impl<V> Default for ConnectionGraph<V> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }
}

impl<V> ConnectionGraph<V> {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Returns the number of vertices with at least one connection.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns whether no connection has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates every known vertex in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }
}

impl<V: Clone + Ord + fmt::Debug> ConnectionGraph<V> {
    /// Records an undirected connection between `left` and `right`.
    ///
    /// Either vertex is created if this is its first connection. Adding an
    /// existing connection again leaves the graph unchanged.
    ///
    /// # Errors
    /// Returns [`KindredError::InvalidEdge`] when `left == right`; the graph is
    /// not modified.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::{ConnectionGraph, KindredErrorCode};
    ///
    /// let mut graph = ConnectionGraph::new();
    /// graph.add_connection(1, 2)?;
    /// graph.add_connection(2, 1)?;
    /// assert_eq!(graph.edge_count(), 1);
    ///
    /// let err = graph.add_connection(3, 3).expect_err("self-loops are rejected");
    /// assert_eq!(err.code(), KindredErrorCode::InvalidEdge);
    /// assert!(!graph.has_vertex(&3));
    /// # Ok::<(), kindred_core::KindredError>(())
    /// ```
    pub fn add_connection(&mut self, left: V, right: V) -> Result<()> {
        if left == right {
            return Err(KindredError::self_loop(&left));
        }
        trace!(left = ?left, right = ?right, "recording connection");
        self.adjacency
            .entry(left.clone())
            .or_default()
            .insert(right.clone());
        self.adjacency.entry(right).or_default().insert(left);
        Ok(())
    }

    /// Returns whether `vertex` has at least one recorded connection.
    #[must_use]
    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the vertices directly connected to `vertex`.
    ///
    /// # Errors
    /// Returns [`KindredError::UnknownVertex`] when `vertex` was never added.
    pub fn neighbors(&self, vertex: &V) -> Result<&BTreeSet<V>> {
        self.adjacency
            .get(vertex)
            .ok_or_else(|| KindredError::unknown_vertex(vertex))
    }

    /// Returns how many connections `vertex` has.
    ///
    /// # Errors
    /// Returns [`KindredError::UnknownVertex`] when `vertex` was never added.
    pub fn degree(&self, vertex: &V) -> Result<usize> {
        self.neighbors(vertex).map(BTreeSet::len)
    }

    /// Returns the neighbours shared by `left` and `right`.
    ///
    /// # Errors
    /// Returns [`KindredError::UnknownVertex`] for the first argument that is
    /// not in the graph.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use kindred_core::ConnectionGraph;
    ///
    /// let mut graph = ConnectionGraph::new();
    /// for (a, b) in [("alice", "bob"), ("alice", "carol"), ("bob", "carol")] {
    ///     graph.add_connection(a, b)?;
    /// }
    /// assert_eq!(
    ///     graph.mutual_friends(&"alice", &"bob")?,
    ///     BTreeSet::from(["carol"]),
    /// );
    /// # Ok::<(), kindred_core::KindredError>(())
    /// ```
    pub fn mutual_friends(&self, left: &V, right: &V) -> Result<BTreeSet<V>> {
        let left_friends = self.neighbors(left)?;
        let right_friends = self.neighbors(right)?;
        Ok(left_friends.intersection(right_friends).cloned().collect())
    }

    /// Returns the vertices exactly two hops from `vertex`, excluding
    /// `vertex` itself and its direct neighbours.
    ///
    /// # Errors
    /// Returns [`KindredError::UnknownVertex`] when `vertex` was never added.
    pub fn friends_of_friends(&self, vertex: &V) -> Result<BTreeSet<V>> {
        let friends = self.neighbors(vertex)?;
        let mut reachable = BTreeSet::new();
        for friend in friends {
            for candidate in self.neighbors(friend)? {
                if candidate != vertex && !friends.contains(candidate) {
                    reachable.insert(candidate.clone());
                }
            }
        }
        debug!(vertex = ?vertex, found = reachable.len(), "expanded friends of friends");
        Ok(reachable)
    }

    /// Iterates every connection once as `(lower, higher)` in ascending order.
    ///
    /// Together with [`Self::vertices`] this is the read surface handed to
    /// renderers.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.adjacency.iter().flat_map(|(vertex, neighbours)| {
            neighbours
                .range::<V, _>((Bound::Excluded(vertex), Bound::Unbounded))
                .map(move |neighbour| (vertex, neighbour))
        })
    }

    /// Returns the number of distinct connections.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
