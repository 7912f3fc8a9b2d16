//! Unit tests for roster loading, query execution and rendering.

use super::commands::{command_label, roster_name};
use super::test_helpers::{neighbourhood_roster, rendered, run_on, temp_dir, write_roster};
use super::{
    Cli, CliError, Command, DotArgs, PairArgs, PathArgs, QueryOutcome, SampleArgs, UserArgs,
};

use std::path::Path;

use clap::Parser;
use kindred_core::KindredErrorCode;
use kindred_test_support::trace::TraceCapture;
use rstest::rstest;
use tracing::Level;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn pair(left: &str, right: &str) -> PairArgs {
    PairArgs {
        left: left.to_owned(),
        right: right.to_owned(),
    }
}

fn user(name: &str) -> UserArgs {
    UserArgs {
        user: name.to_owned(),
    }
}

fn path_args(from: &str, to: &str, max_depth: usize) -> PathArgs {
    PathArgs {
        from: from.to_owned(),
        to: to.to_owned(),
        max_depth,
    }
}

#[rstest]
#[case::mutual(
    Command::Mutual(pair("Alice", "Bob")),
    "mutual friends of Alice and Bob: Charlie\n"
)]
#[case::mutual_none(
    Command::Mutual(pair("Alice", "Harry")),
    "mutual friends of Alice and Harry: (none)\n"
)]
#[case::path(
    Command::Path(path_args("Alice", "George", 3)),
    "path from Alice to George: Alice -> Bob -> Eve -> George (3 hops, limit 3)\n"
)]
#[case::path_beyond_limit(
    Command::Path(path_args("Alice", "Harry", 3)),
    "no path from Alice to Harry within 3 hops\n"
)]
#[case::path_within_raised_limit(
    Command::Path(path_args("Harry", "Alice", 4)),
    "path from Harry to Alice: Harry -> George -> Eve -> Bob -> Alice (4 hops, limit 4)\n"
)]
#[case::degree(Command::Degree(user("Bob")), "degree of Bob: 4\n")]
#[case::fof(Command::Fof(user("Alice")), "friends of friends of Alice: Eve, Frank\n")]
#[case::probability(
    Command::Probability(pair("Eve", "Alice")),
    "probability of Eve and Alice: 0.7\n"
)]
#[case::probability_absent(
    Command::Probability(pair("Alice", "Bob")),
    "probability of Alice and Bob: 0\n"
)]
#[case::summary(
    Command::Summary,
    "roster: neighbourhood\nusers: 8\nfriendships: 12\nprobabilistic links: 5\n"
)]
fn queries_render_expected_lines(#[case] command: Command, #[case] expected: &str) -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let summary = run_on(roster, command)?;
    assert_eq!(summary.roster, "neighbourhood");
    assert_eq!(rendered(&summary), expected);
    Ok(())
}

#[rstest]
fn seeded_sampling_is_reproducible() -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let sample = |seed| {
        run_on(
            roster.clone(),
            Command::Sample(SampleArgs {
                pair: pair("Alice", "Eve"),
                trials: 200,
                seed: Some(seed),
            }),
        )
    };
    let first = sample(17)?;
    let second = sample(17)?;
    assert_eq!(first, second);
    match first.outcome {
        QueryOutcome::Sample {
            trials,
            successes,
            probability,
            ..
        } => {
            assert_eq!(trials, 200);
            assert_eq!(probability, 0.7);
            assert!(successes > 0 && successes < trials);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn unlinked_pairs_never_sample_connected() -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let summary = run_on(
        roster,
        Command::Sample(SampleArgs {
            pair: pair("Alice", "Bob"),
            trials: 50,
            seed: None,
        }),
    )?;
    assert_eq!(
        rendered(&summary),
        "sampled Alice and Bob: 0 of 50 trials connected (p = 0)\n"
    );
    Ok(())
}

#[rstest]
fn zero_trials_surface_core_error() -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let err = run_on(
        roster,
        Command::Sample(SampleArgs {
            pair: pair("Alice", "Eve"),
            trials: 0,
            seed: Some(1),
        }),
    )
    .expect_err("zero trials must fail");
    assert!(matches!(
        err,
        CliError::Core(ref core) if core.code() == KindredErrorCode::InvalidTrialCount
    ));
    Ok(())
}

#[rstest]
#[case::degree(Command::Degree(user("Zed")))]
#[case::mutual(Command::Mutual(pair("Alice", "Zed")))]
#[case::path(Command::Path(path_args("Zed", "Alice", 3)))]
fn unknown_users_are_reported(#[case] command: Command) -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let err = run_on(roster, command).expect_err("unknown user must fail");
    match err {
        CliError::Core(core) => {
            assert_eq!(core.code(), KindredErrorCode::UnknownVertex);
            assert!(core.to_string().contains("\"Zed\""));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn missing_roster_is_an_io_error() {
    let dir = temp_dir();
    let missing = dir.path().join("absent.txt");
    let err = run_on(missing.clone(), Command::Summary).expect_err("missing file must fail");
    match err {
        CliError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::single_field("Alice\n", 1)]
#[case::too_many_fields("# header\n\nAlice Bob 0.5 extra\n", 3)]
#[case::not_a_number("Alice Bob\nAlice Eve likely\n", 2)]
#[case::probability_out_of_range("Alice Eve 1.5\n", 1)]
#[case::self_loop("Alice Bob\nBob Bob\n", 2)]
#[case::self_link("Alice Alice 0.2\n", 1)]
fn malformed_lines_report_their_number(
    #[case] contents: &str,
    #[case] expected_line: usize,
) -> TestResult {
    let dir = temp_dir();
    let roster = write_roster(&dir, "bad.txt", contents)?;
    let err = run_on(roster, Command::Summary).expect_err("malformed roster must fail");
    match err {
        CliError::Parse { line, reason } => {
            assert_eq!(line, expected_line);
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn comments_blanks_and_spacing_are_tolerated() -> TestResult {
    let dir = temp_dir();
    let roster = write_roster(
        &dir,
        "loose.txt",
        "# friends\n\n   Alice    Bob  \n\tBob\tCarol\n  # indented comment\nAlice Carol 0.25\n",
    )?;
    let summary = run_on(roster, Command::Summary)?;
    assert_eq!(
        summary.outcome,
        QueryOutcome::Summary {
            users: 3,
            friendships: 2,
            links: 1,
        }
    );
    Ok(())
}

#[rstest]
fn export_dot_marks_the_requested_path() -> TestResult {
    let dir = temp_dir();
    let roster = write_roster(&dir, "line.txt", "a b\nb c\nc d\na x\n")?;
    let summary = run_on(
        roster,
        Command::ExportDot(DotArgs {
            from: Some("a".to_owned()),
            to: Some("c".to_owned()),
            max_depth: 3,
        }),
    )?;
    let text = rendered(&summary);
    assert!(text.starts_with("graph kindred {\n"));
    assert!(text.contains("    \"a\" -- \"b\" [color=\"red\", penwidth=2];\n"));
    assert!(text.contains("    \"b\" -- \"c\" [color=\"red\", penwidth=2];\n"));
    assert!(text.contains("    \"c\" -- \"d\";\n"));
    assert!(text.contains("    \"a\" -- \"x\";\n"));
    assert!(text.ends_with("}\n"));
    Ok(())
}

#[rstest]
fn export_dot_without_reachable_path_is_plain() -> TestResult {
    let dir = temp_dir();
    let roster = write_roster(&dir, "line.txt", "a b\nb c\nc d\n")?;
    let summary = run_on(
        roster,
        Command::ExportDot(DotArgs {
            from: Some("a".to_owned()),
            to: Some("d".to_owned()),
            max_depth: 2,
        }),
    )?;
    assert!(!rendered(&summary).contains("color"));
    Ok(())
}

#[rstest]
fn run_records_cli_span() -> TestResult {
    let dir = temp_dir();
    let roster = neighbourhood_roster(&dir)?;
    let (result, capture) =
        TraceCapture::capture(|| run_on(roster.clone(), Command::Degree(user("Eve"))));
    result?;

    let span = capture.span("cli.run").expect("cli.run span must exist");
    assert_eq!(span.fields.get("command").map(String::as_str), Some("degree"));
    assert_eq!(
        span.fields.get("roster"),
        Some(&roster.display().to_string())
    );
    let load = capture
        .span("cli.load_roster")
        .expect("cli.load_roster span must exist");
    assert_eq!(load.fields.get("path"), Some(&roster.display().to_string()));
    assert!(capture.has_event(Level::INFO, "roster loaded"));
    assert!(capture.has_event(Level::INFO, "command completed"));
    Ok(())
}

#[rstest]
fn arguments_parse_into_commands() -> TestResult {
    let cli = Cli::try_parse_from(["kindred", "r.txt", "path", "Ann", "Bo", "--max-depth", "5"])?;
    assert_eq!(cli.roster, Path::new("r.txt"));
    match cli.command {
        Command::Path(PathArgs {
            from,
            to,
            max_depth,
        }) => {
            assert_eq!((from.as_str(), to.as_str(), max_depth), ("Ann", "Bo", 5));
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::try_parse_from(["kindred", "r.txt", "sample", "Ann", "Bo", "--seed", "9"])?;
    match cli.command {
        Command::Sample(args) => {
            assert_eq!(args.trials, 1);
            assert_eq!(args.seed, Some(9));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn path_depth_defaults_to_three() -> TestResult {
    let cli = Cli::try_parse_from(["kindred", "r.txt", "export-dot"])?;
    match cli.command {
        Command::ExportDot(args) => {
            assert_eq!(args.max_depth, 3);
            assert!(args.from.is_none() && args.to.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn export_dot_requires_both_endpoints() {
    let result = Cli::try_parse_from(["kindred", "r.txt", "export-dot", "--from", "Ann"]);
    assert!(result.is_err());
}

#[rstest]
#[case(Command::Summary, "summary")]
#[case(Command::Fof(user("a")), "fof")]
#[case(Command::ExportDot(DotArgs { from: None, to: None, max_depth: 1 }), "export-dot")]
fn commands_have_stable_labels(#[case] command: Command, #[case] expected: &str) {
    assert_eq!(command_label(&command), expected);
}

#[rstest]
#[case::with_extension("/tmp/friends.txt", "friends")]
#[case::without_extension("/tmp/friends", "friends")]
#[case::missing_stem("", "roster")]
fn roster_names_come_from_the_file_stem(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(roster_name(Path::new(raw)), expected);
}
