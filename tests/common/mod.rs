#![allow(dead_code)]

use std::process::{Command, Output};
use std::time::Duration;

use mexec_test_utils::process::run_with_deadline;

/// Generous upper bound for pipelines that must terminate on their own.
pub const DEADLINE: Duration = Duration::from_secs(10);

/// `Command` for the `mexec` binary built alongside these tests.
pub fn mexec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mexec"))
}

/// Run `mexec` with `args`, optionally feeding `stdin`, and insist that it
/// finishes before [`DEADLINE`].
pub fn run_mexec(args: &[&str], stdin: Option<&[u8]>) -> Output {
    run_with_deadline(mexec().args(args), stdin, DEADLINE)
        .unwrap_or_else(|| panic!("mexec {:?} did not finish within {:?}", args, DEADLINE))
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
