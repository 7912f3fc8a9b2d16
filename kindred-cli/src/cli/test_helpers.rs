//! Small helpers shared across CLI tests.

use std::fs;
use std::io;
use std::path::PathBuf;

use kindred_test_support::fixtures::{NEIGHBOURHOOD, SUSPECTED_LINKS, roster};
use tempfile::TempDir;

use super::{Cli, CliError, Command, ExecutionSummary, render_summary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_roster(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

pub(super) fn neighbourhood_roster(dir: &TempDir) -> io::Result<PathBuf> {
    write_roster(dir, "neighbourhood.txt", &roster(NEIGHBOURHOOD, SUSPECTED_LINKS))
}

pub(super) fn run_on(roster: PathBuf, command: Command) -> Result<ExecutionSummary, CliError> {
    run_cli(Cli { roster, command })
}

pub(super) fn rendered(summary: &ExecutionSummary) -> String {
    let mut out = Vec::new();
    match render_summary(summary, &mut out) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => panic!("rendering into memory failed: {err}"),
    }
}
