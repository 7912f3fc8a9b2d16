//! Graphviz DOT export of the confirmed friendship graph.

use std::collections::BTreeSet;
use std::io::{self, Write};

use kindred_core::{ConnectionGraph, ConnectionPath};

const HIGHLIGHT: &str = "color=\"red\", penwidth=2";

/// Writes `graph` as an undirected DOT graph, marking the vertices and edges
/// of `path` when one is supplied.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
///
/// # Examples
/// ```
/// # use kindred_cli::cli::write_dot;
/// # use kindred_core::ConnectionGraph;
/// let mut graph = ConnectionGraph::new();
/// graph.add_connection("ann".to_owned(), "bo".to_owned())?;
/// let mut out = Vec::new();
/// write_dot(&graph, None, &mut out)?;
/// let text = String::from_utf8(out)?;
/// assert!(text.contains("\"ann\" -- \"bo\";"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_dot(
    graph: &ConnectionGraph<String>,
    path: Option<&ConnectionPath<String>>,
    mut writer: impl Write,
) -> io::Result<()> {
    let on_path: BTreeSet<&String> = path.map_or_else(BTreeSet::new, |path| {
        path.vertices().iter().collect()
    });
    let path_edges: BTreeSet<(&String, &String)> = path.map_or_else(BTreeSet::new, |path| {
        path.edges()
            .map(|(left, right)| if left <= right { (left, right) } else { (right, left) })
            .collect()
    });

    writeln!(writer, "graph kindred {{")?;
    for vertex in graph.vertices() {
        if on_path.contains(vertex) {
            writeln!(writer, "    {} [{HIGHLIGHT}];", quote(vertex))?;
        } else {
            writeln!(writer, "    {};", quote(vertex))?;
        }
    }
    for (left, right) in graph.edges() {
        let edge = format!("{} -- {}", quote(left), quote(right));
        if path_edges.contains(&(left, right)) {
            writeln!(writer, "    {edge} [{HIGHLIGHT}];")?;
        } else {
            writeln!(writer, "    {edge};")?;
        }
    }
    writeln!(writer, "}}")
}

fn quote(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
