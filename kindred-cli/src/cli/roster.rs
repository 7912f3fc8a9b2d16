//! Roster file loading.
//!
//! A roster is UTF-8 text with one relationship per line. Blank lines and
//! lines starting with `#` are skipped; `a b` records a confirmed friendship
//! and `a b p` records a probabilistic link with probability `p`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use kindred_core::SocialNetwork;
use tracing::{Span, debug, field, info, instrument};

use super::CliError;

/// Opens and parses the roster at `path`.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read and
/// [`CliError::Parse`] for malformed or rejected lines.
#[instrument(name = "cli.load_roster", err, fields(path = field::Empty))]
pub fn load_roster(path: &Path) -> Result<SocialNetwork<String>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let network = parse_roster(BufReader::new(file)).map_err(|err| match err {
        RosterError::Io(source) => io_error(source),
        RosterError::Line { line, reason } => CliError::Parse { line, reason },
    })?;
    info!(
        users = network.connections().vertex_count(),
        friendships = network.connections().edge_count(),
        links = network.links().len(),
        "roster loaded"
    );
    Ok(network)
}

#[derive(Debug)]
pub(super) enum RosterError {
    Io(std::io::Error),
    Line { line: usize, reason: String },
}

pub(super) fn parse_roster(reader: impl BufRead) -> Result<SocialNetwork<String>, RosterError> {
    let mut network = SocialNetwork::new();
    for (index, text) in reader.lines().enumerate() {
        let line = index.saturating_add(1);
        let text = text.map_err(RosterError::Io)?;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        apply_line(&mut network, trimmed).map_err(|reason| {
            debug!(line, reason = reason.as_str(), "rejected roster line");
            RosterError::Line { line, reason }
        })?;
    }
    Ok(network)
}

fn apply_line(network: &mut SocialNetwork<String>, text: &str) -> Result<(), String> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    match fields.as_slice() {
        [left, right] => network
            .add_connection((*left).to_owned(), (*right).to_owned())
            .map_err(|err| err.to_string()),
        [left, right, raw] => {
            let probability: f64 = raw
                .parse()
                .map_err(|_| format!("`{raw}` is not a number"))?;
            network
                .add_probabilistic_connection((*left).to_owned(), (*right).to_owned(), probability)
                .map_err(|err| err.to_string())
        }
        other => Err(format!(
            "expected `a b` or `a b probability`, found {} fields",
            other.len()
        )),
    }
}
