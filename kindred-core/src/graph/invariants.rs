//! Structural invariant checks for [`ConnectionGraph`].
//!
//! `add_connection` upholds these by construction. The checker walks the
//! adjacency map directly and reports what it finds.

use std::fmt;

use thiserror::Error;

use super::ConnectionGraph;

/// Reports a structural problem found in a [`ConnectionGraph`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum GraphInvariantViolation {
    /// A connection is recorded on one endpoint but not the other.
    #[error("connection {origin} -> {target} is missing the reverse link")]
    MissingBacklink {
        /// Vertex that lists the one-way connection.
        origin: String,
        /// Vertex lacking the reverse connection.
        target: String,
    },
    /// A vertex lists itself as a neighbour.
    #[error("vertex {vertex} is connected to itself")]
    SelfLoop {
        /// The looping vertex.
        vertex: String,
    },
    /// A vertex is registered without any neighbour.
    #[error("vertex {vertex} is recorded without any connection")]
    EmptyNeighbourhood {
        /// The isolated vertex.
        vertex: String,
    },
}

impl<V: Ord + fmt::Debug> ConnectionGraph<V> {
    /// Verifies symmetry, the absence of self-loops, and that every vertex has
    /// at least one connection, stopping at the first violation.
    ///
    /// # Errors
    /// Returns the first [`GraphInvariantViolation`] encountered while walking
    /// vertices in ascending order.
    pub fn check_invariants(&self) -> Result<(), GraphInvariantViolation> {
        self.violations().next().map_or(Ok(()), Err)
    }

    /// Collects every invariant violation in the graph.
    #[must_use]
    pub fn invariant_violations(&self) -> Vec<GraphInvariantViolation> {
        self.violations().collect()
    }

    fn violations(&self) -> impl Iterator<Item = GraphInvariantViolation> + '_ {
        self.adjacency.iter().flat_map(move |(vertex, neighbours)| {
            let isolated = neighbours
                .is_empty()
                .then(|| GraphInvariantViolation::EmptyNeighbourhood {
                    vertex: format!("{vertex:?}"),
                });
            let per_edge = neighbours
                .iter()
                .filter_map(move |target| self.check_edge(vertex, target));
            isolated.into_iter().chain(per_edge)
        })
    }

    fn check_edge(&self, origin: &V, target: &V) -> Option<GraphInvariantViolation> {
        if origin == target {
            return Some(GraphInvariantViolation::SelfLoop {
                vertex: format!("{origin:?}"),
            });
        }
        let has_backlink = self
            .adjacency
            .get(target)
            .is_some_and(|reverse| reverse.contains(origin));
        (!has_backlink).then(|| GraphInvariantViolation::MissingBacklink {
            origin: format!("{origin:?}"),
            target: format!("{target:?}"),
        })
    }
}
