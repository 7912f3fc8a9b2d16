//! Command implementations and argument parsing for the kindred CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use kindred_core::{ConnectionGraph, ConnectionPath, KindredError, RngSource, SocialNetwork};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::{dot::write_dot, roster::load_roster};

const DEFAULT_MAX_DEPTH: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "kindred", about = "Query a social graph roster.")]
pub struct Cli {
    /// Roster file with one `a b` friendship or `a b probability` link per line.
    pub roster: PathBuf,

    /// Query to run against the roster.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported queries.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the friends two users share.
    Mutual(PairArgs),
    /// Find a shortest chain of friendships between two users.
    Path(PathArgs),
    /// Count a user's confirmed friends.
    Degree(UserArgs),
    /// List users exactly two friendships away.
    Fof(UserArgs),
    /// Show the stored probability of a link.
    Probability(PairArgs),
    /// Sample whether a probabilistic link is present.
    Sample(SampleArgs),
    /// Count users, friendships and links.
    Summary,
    /// Write the friendship graph as Graphviz DOT.
    ExportDot(DotArgs),
}

/// A single user.
#[derive(Debug, Args, Clone)]
pub struct UserArgs {
    /// User identifier.
    pub user: String,
}

/// An unordered pair of users.
#[derive(Debug, Args, Clone)]
pub struct PairArgs {
    /// First user.
    pub left: String,
    /// Second user.
    pub right: String,
}

/// Options accepted by the `path` command.
#[derive(Debug, Args, Clone)]
pub struct PathArgs {
    /// User the path starts from.
    pub from: String,
    /// User the path ends at.
    pub to: String,
    /// Maximum number of friendships the path may cross.
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// The linked pair.
    #[command(flatten)]
    pub pair: PairArgs,
    /// Number of independent draws.
    #[arg(long, default_value_t = 1)]
    pub trials: usize,
    /// Seed for reproducible draws; omitted seeds use system entropy.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options accepted by the `export-dot` command.
#[derive(Debug, Args, Clone)]
pub struct DotArgs {
    /// Start of a path to highlight.
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// End of a path to highlight.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Maximum depth of the highlighted path.
    #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while reading the roster.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A roster line was malformed or rejected.
    #[error("roster line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },
    /// A query failed in the graph engine.
    #[error(transparent)]
    Core(#[from] KindredError),
}

/// Result of a single query, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Friends shared by two users.
    Mutual {
        /// First user.
        left: String,
        /// Second user.
        right: String,
        /// Shared friends in sorted order.
        friends: Vec<String>,
    },
    /// Outcome of a bounded path search.
    Path {
        /// Start user.
        from: String,
        /// End user.
        to: String,
        /// Depth ceiling used for the search.
        max_depth: usize,
        /// Users along the path, when one exists.
        path: Option<Vec<String>>,
    },
    /// Confirmed friend count.
    Degree {
        /// Queried user.
        user: String,
        /// Number of confirmed friends.
        degree: usize,
    },
    /// Users exactly two friendships away.
    FriendsOfFriends {
        /// Queried user.
        user: String,
        /// Reachable users in sorted order.
        found: Vec<String>,
    },
    /// Stored link probability.
    Probability {
        /// First user.
        left: String,
        /// Second user.
        right: String,
        /// Stored probability, `0` when absent.
        probability: f64,
    },
    /// Monte-Carlo sampling of a link.
    Sample {
        /// First user.
        left: String,
        /// Second user.
        right: String,
        /// Draws taken.
        trials: usize,
        /// Draws that found the link present.
        successes: usize,
        /// Stored probability.
        probability: f64,
    },
    /// Roster totals.
    Summary {
        /// Users with at least one friendship.
        users: usize,
        /// Confirmed friendships.
        friendships: usize,
        /// Stored probabilistic links.
        links: usize,
    },
    /// Friendship graph to export, with an optional path to highlight.
    Dot {
        /// Confirmed friendships.
        graph: ConnectionGraph<String>,
        /// Path whose vertices and edges are marked.
        path: Option<ConnectionPath<String>>,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Roster name derived from the file stem.
    pub roster: String,
    /// Query result.
    pub outcome: QueryOutcome,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the roster cannot be loaded or the query fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use kindred_cli::cli::{Cli, Command, QueryOutcome, UserArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "alice bob\nbob carol\n")?;
/// let cli = Cli {
///     roster: file.path().to_path_buf(),
///     command: Command::Degree(UserArgs { user: "bob".into() }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(
///     summary.outcome,
///     QueryOutcome::Degree { user: "bob".into(), degree: 2 }
/// );
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty, roster = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let Cli { roster, command } = cli;
    let span = Span::current();
    span.record("command", field::display(command_label(&command)));
    span.record("roster", field::display(roster.display()));

    let network = load_roster(&roster)?;
    let outcome = run_query(&network, command)?;
    info!("command completed");
    Ok(ExecutionSummary {
        roster: roster_name(&roster),
        outcome,
    })
}

pub(super) fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Mutual(_) => "mutual",
        Command::Path(_) => "path",
        Command::Degree(_) => "degree",
        Command::Fof(_) => "fof",
        Command::Probability(_) => "probability",
        Command::Sample(_) => "sample",
        Command::Summary => "summary",
        Command::ExportDot(_) => "export-dot",
    }
}

/// Runs `command` against an already loaded network.
///
/// # Errors
/// Returns [`CliError::Core`] when the query references unknown users or
/// carries invalid parameters.
pub fn run_query(
    network: &SocialNetwork<String>,
    command: Command,
) -> Result<QueryOutcome, CliError> {
    let outcome = match command {
        Command::Mutual(PairArgs { left, right }) => {
            let friends = network.mutual_friends(&left, &right)?.into_iter().collect();
            QueryOutcome::Mutual {
                left,
                right,
                friends,
            }
        }
        Command::Path(PathArgs { from, to, max_depth }) => {
            let path = network
                .find_path(&from, &to, max_depth)?
                .map(|path| path.into_vertices());
            QueryOutcome::Path {
                from,
                to,
                max_depth,
                path,
            }
        }
        Command::Degree(UserArgs { user }) => {
            let degree = network.degree(&user)?;
            QueryOutcome::Degree { user, degree }
        }
        Command::Fof(UserArgs { user }) => {
            let found = network.friends_of_friends(&user)?.into_iter().collect();
            QueryOutcome::FriendsOfFriends { user, found }
        }
        Command::Probability(PairArgs { left, right }) => {
            let probability = network.get_probability(&left, &right);
            QueryOutcome::Probability {
                left,
                right,
                probability,
            }
        }
        Command::Sample(args) => sample(network, args)?,
        Command::Summary => QueryOutcome::Summary {
            users: network.connections().vertex_count(),
            friendships: network.connections().edge_count(),
            links: network.links().len(),
        },
        Command::ExportDot(args) => export_dot(network, args)?,
    };
    Ok(outcome)
}

#[instrument(
    name = "cli.sample",
    err,
    skip(network, args),
    fields(trials = args.trials, seed = ?args.seed),
)]
fn sample(network: &SocialNetwork<String>, args: SampleArgs) -> Result<QueryOutcome, CliError> {
    let SampleArgs {
        pair: PairArgs { left, right },
        trials,
        seed,
    } = args;
    let rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    let estimate =
        network
            .links()
            .estimate_connectivity(&left, &right, trials, &mut RngSource::new(rng))?;
    Ok(QueryOutcome::Sample {
        left,
        right,
        trials: estimate.trials().get(),
        successes: estimate.successes(),
        probability: estimate.probability().get(),
    })
}

fn export_dot(network: &SocialNetwork<String>, args: DotArgs) -> Result<QueryOutcome, CliError> {
    let path = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            let path = network.find_path(&from, &to, args.max_depth)?;
            if path.is_none() {
                info!(
                    from = from.as_str(),
                    to = to.as_str(),
                    max_depth = args.max_depth,
                    "no path to highlight"
                );
            }
            path
        }
        _ => None,
    };
    Ok(QueryOutcome::Dot {
        graph: network.connections().clone(),
        path,
    })
}

pub(super) fn roster_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "roster".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as plain text lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use kindred_cli::cli::{ExecutionSummary, QueryOutcome, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     roster: "demo".into(),
///     outcome: QueryOutcome::Degree { user: "bob".into(), degree: 3 },
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "degree of bob: 3\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match &summary.outcome {
        QueryOutcome::Mutual {
            left,
            right,
            friends,
        } => writeln!(
            writer,
            "mutual friends of {left} and {right}: {}",
            list(friends)
        ),
        QueryOutcome::Path {
            from,
            to,
            max_depth,
            path: Some(path),
        } => writeln!(
            writer,
            "path from {from} to {to}: {} ({} hops, limit {max_depth})",
            path.join(" -> "),
            path.len().saturating_sub(1)
        ),
        QueryOutcome::Path {
            from,
            to,
            max_depth,
            path: None,
        } => writeln!(writer, "no path from {from} to {to} within {max_depth} hops"),
        QueryOutcome::Degree { user, degree } => writeln!(writer, "degree of {user}: {degree}"),
        QueryOutcome::FriendsOfFriends { user, found } => {
            writeln!(writer, "friends of friends of {user}: {}", list(found))
        }
        QueryOutcome::Probability {
            left,
            right,
            probability,
        } => writeln!(writer, "probability of {left} and {right}: {probability}"),
        QueryOutcome::Sample {
            left,
            right,
            trials,
            successes,
            probability,
        } => writeln!(
            writer,
            "sampled {left} and {right}: {successes} of {trials} trials connected (p = {probability})"
        ),
        QueryOutcome::Summary {
            users,
            friendships,
            links,
        } => {
            writeln!(writer, "roster: {}", summary.roster)?;
            writeln!(writer, "users: {users}")?;
            writeln!(writer, "friendships: {friendships}")?;
            writeln!(writer, "probabilistic links: {links}")
        }
        QueryOutcome::Dot { graph, path } => write_dot(graph, path.as_ref(), writer),
    }
}

fn list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_owned()
    } else {
        names.join(", ")
    }
}
