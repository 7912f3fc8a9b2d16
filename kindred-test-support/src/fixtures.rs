//! Friendship rosters reused by unit, integration and CLI tests.
//!
//! Rosters are plain edge lists so they can seed any graph type without this
//! crate depending on the library under test.

/// Five friendships forming a triangle with a short tail.
///
/// ```text
/// Alice - Bob - Eve - George
///    \    /
///   Charlie
/// ```
pub const CIRCLE: &[(&str, &str)] = &[
    ("Alice", "Bob"),
    ("Alice", "Charlie"),
    ("Bob", "Charlie"),
    ("Bob", "Eve"),
    ("Eve", "George"),
];

/// Twelve friendships among eight neighbours; `Harry` sits four hops from
/// `Alice`.
pub const NEIGHBOURHOOD: &[(&str, &str)] = &[
    ("Alice", "Bob"),
    ("Alice", "Charlie"),
    ("Alice", "David"),
    ("Bob", "Charlie"),
    ("Bob", "Eve"),
    ("Bob", "Frank"),
    ("Charlie", "David"),
    ("Charlie", "Eve"),
    ("David", "Frank"),
    ("Eve", "George"),
    ("Frank", "George"),
    ("George", "Harry"),
];

/// Probabilistic links layered over [`NEIGHBOURHOOD`].
pub const SUSPECTED_LINKS: &[(&str, &str, f64)] = &[
    ("Alice", "Eve", 0.7),
    ("Bob", "David", 0.5),
    ("Charlie", "Frank", 0.3),
    ("David", "George", 0.4),
    ("Eve", "Harry", 0.6),
];

/// Renders rosters in the line format accepted by the `kindred` CLI.
///
/// # Examples
/// ```
/// use kindred_test_support::fixtures::{CIRCLE, roster};
///
/// let text = roster(CIRCLE, &[("Alice", "Eve", 0.25)]);
/// assert!(text.contains("Alice Bob\n"));
/// assert!(text.ends_with("Alice Eve 0.25\n"));
/// ```
#[must_use]
pub fn roster(edges: &[(&str, &str)], links: &[(&str, &str, f64)]) -> String {
    let mut text = String::from("# generated roster\n");
    for (left, right) in edges {
        text.push_str(&format!("{left} {right}\n"));
    }
    for (left, right, probability) in links {
        text.push_str(&format!("{left} {right} {probability}\n"));
    }
    text
}
