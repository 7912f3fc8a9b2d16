//! Bounded-depth breadth-first path search.

use std::{
    collections::{BTreeMap, VecDeque},
    fmt,
};

use tracing::{debug, instrument};

use super::ConnectionGraph;
use crate::error::{KindredError, Result};

/// Ordered sequence of vertices linking a start vertex to an end vertex.
///
/// Consecutive vertices are always connected in the graph that produced the
/// path. A path from a vertex to itself holds a single vertex and no hops.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionPath<V> {
    vertices: Vec<V>,
}

impl<V> ConnectionPath<V> {
    /// Returns the vertices from start to end inclusive.
    #[must_use]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Consumes the path and returns its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }

    /// Returns the number of edges traversed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns the first vertex of the path.
    #[must_use]
    pub fn start(&self) -> Option<&V> {
        self.vertices.first()
    }

    /// Returns the last vertex of the path.
    #[must_use]
    pub fn end(&self) -> Option<&V> {
        self.vertices.last()
    }

    /// Iterates the traversed edges in order, for highlighting.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> {
        self.vertices.iter().zip(self.vertices.iter().skip(1))
    }
}

impl<V: Clone + Ord + fmt::Debug> ConnectionGraph<V> {
    /// Finds the first path from `start` to `end` using at most `max_depth`
    /// connections.
    ///
    /// The search is breadth-first with a visited set. Neighbours are expanded
    /// in ascending order, so among several shortest paths the one whose
    /// vertices sort first at each step is returned. The search stops with
    /// `None` as soon as the frontier reaches `max_depth` hops without having
    /// met `end`. When `start == end` the single-vertex path is returned.
    ///
    /// # Errors
    /// Returns [`KindredError::UnknownVertex`] when either endpoint is not in
    /// the graph. An unreachable `end` is `Ok(None)`, not an error.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::ConnectionGraph;
    ///
    /// let mut graph = ConnectionGraph::new();
    /// for (a, b) in [("alice", "bob"), ("bob", "eve"), ("eve", "george")] {
    ///     graph.add_connection(a, b)?;
    /// }
    /// let path = graph.find_path(&"alice", &"george", 3)?.expect("within three hops");
    /// assert_eq!(path.vertices(), ["alice", "bob", "eve", "george"]);
    /// assert!(graph.find_path(&"alice", &"george", 2)?.is_none());
    /// # Ok::<(), kindred_core::KindredError>(())
    /// ```
    #[instrument(
        name = "graph.find_path",
        err,
        skip(self, start, end),
        fields(start = ?start, end = ?end, max_depth = max_depth),
    )]
    pub fn find_path(
        &self,
        start: &V,
        end: &V,
        max_depth: usize,
    ) -> Result<Option<ConnectionPath<V>>> {
        if !self.has_vertex(start) {
            return Err(KindredError::unknown_vertex(start));
        }
        if !self.has_vertex(end) {
            return Err(KindredError::unknown_vertex(end));
        }
        if start == end {
            return Ok(Some(ConnectionPath {
                vertices: vec![start.clone()],
            }));
        }

        let mut search = PathSearch::new(start);
        while let Some((vertex, depth)) = search.frontier.pop_front() {
            if depth >= max_depth {
                debug!(depth, "depth ceiling reached without meeting the target");
                return Ok(None);
            }
            for neighbour in self.neighbors(vertex)? {
                if neighbour == end {
                    search.parents.insert(neighbour, vertex);
                    let path = search.trace_back(end);
                    debug!(hops = path.hops(), "path found");
                    return Ok(Some(path));
                }
                search.visit(neighbour, vertex, depth.saturating_add(1));
            }
        }
        debug!("frontier exhausted");
        Ok(None)
    }
}

/// Frontier and discovery record for a single search.
///
/// `parents` doubles as the visited set: the start vertex maps to itself and
/// every discovered vertex maps to the vertex it was reached from.
struct PathSearch<'a, V> {
    frontier: VecDeque<(&'a V, usize)>,
    parents: BTreeMap<&'a V, &'a V>,
}

impl<'a, V: Clone + Ord> PathSearch<'a, V> {
    fn new(start: &'a V) -> Self {
        Self {
            frontier: VecDeque::from([(start, 0)]),
            parents: BTreeMap::from([(start, start)]),
        }
    }

    fn visit(&mut self, vertex: &'a V, parent: &'a V, depth: usize) {
        if self.parents.contains_key(vertex) {
            return;
        }
        self.parents.insert(vertex, parent);
        self.frontier.push_back((vertex, depth));
    }

    fn trace_back(&self, end: &'a V) -> ConnectionPath<V> {
        let mut vertices = vec![end.clone()];
        let mut cursor = end;
        while let Some(&parent) = self.parents.get(cursor) {
            if parent == cursor {
                break;
            }
            vertices.push(parent.clone());
            cursor = parent;
        }
        vertices.reverse();
        ConnectionPath { vertices }
    }
}
