// End-to-end runs of the `mexec` binary against real programs.

mod common;

use std::process::Command;

use common::{DEADLINE, run_mexec, stderr_of, stdout_of};
use mexec_test_utils::process::run_with_deadline;
use mexec_test_utils::builders::CommandFileBuilder;

fn run_stages(stages: &[&str], stdin: Option<&[u8]>) -> std::process::Output {
    let file = CommandFileBuilder::new()
        .stages(stages.iter().copied())
        .build_file();
    let path = file.path().to_str().unwrap().to_string();
    run_mexec(&[&path], stdin)
}

#[test]
fn test_all_stages_succeed_exits_zero() {
    let output = run_stages(&["echo hello", "cat", "cat"], None);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "hello\n");
}

#[test]
fn test_output_is_byte_identical_across_a_channel() {
    let output = run_stages(&["printf abc", "cat"], None);
    assert_eq!(stdout_of(&output), "abc");
    assert_eq!(output.status.code(), Some(0));

    let output = run_stages(&["echo a b c", "cat"], None);
    assert_eq!(stdout_of(&output), "a b c\n");
}

#[test]
fn test_data_larger_than_a_pipe_buffer_flows_through() {
    let output = run_stages(&["seq 1 100000", "cat", "wc -l"], None);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output).trim(), "100000");
}

#[test]
fn test_single_stage_inherits_standard_streams() {
    let output = run_stages(&["tr a-z A-Z"], Some(b"shout"));

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "SHOUT");
}

#[test]
fn test_first_stage_reads_orchestrator_stdin() {
    let output = run_stages(&["cat", "tr a-z A-Z"], Some(b"hello\n"));

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "HELLO\n");
}

#[test]
fn test_unbounded_producer_terminates_with_head() {
    let output = run_stages(&["yes", "head -n 1"], None);

    assert_eq!(stdout_of(&output), "y\n");
    // `yes` dies of SIGPIPE once `head` exits, which counts as a failure.
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_long_pipeline_of_cats() {
    let mut stages = vec!["echo deep"];
    stages.extend(std::iter::repeat_n("cat", 49));

    let output = run_stages(&stages, None);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "deep\n");
}

#[test]
fn test_any_nonzero_stage_fails_the_pipeline() {
    for stages in [
        vec!["false", "cat"],
        vec!["true", "false", "true"],
        vec!["echo x", "cat", "false"],
    ] {
        let output = run_stages(&stages, None);
        assert_eq!(output.status.code(), Some(1), "stages: {:?}", stages);
    }
}

#[test]
fn test_missing_program_fails_only_its_stage() {
    let output = run_stages(&["no-such-program-mexec-test", "echo sibling"], None);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "sibling\n");
    assert!(stderr_of(&output).contains("no-such-program-mexec-test"));
}

#[test]
fn test_blank_stage_fails_to_launch_while_siblings_complete() {
    let output = run_stages(&["echo first", "   ", "echo last"], None);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "last\n");
    assert!(stderr_of(&output).contains("empty command line"));
}

#[test]
fn test_commands_from_stdin() {
    let output = run_mexec(&[], Some(b"echo from-stdin\ncat"));

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "from-stdin\n");
}

#[test]
fn test_empty_input_runs_nothing_and_succeeds() {
    let output = run_mexec(&[], Some(b""));

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_channel_creation_failure_is_fatal() {
    let file = CommandFileBuilder::new()
        .stages(std::iter::repeat_n("true", 61))
        .build_file();

    let output = run_with_deadline(
        Command::new("sh")
            .arg("-c")
            .arg(r#"ulimit -n 30 && exec "$0" "$1""#)
            .arg(env!("CARGO_BIN_EXE_mexec"))
            .arg(file.path()),
        None,
        DEADLINE,
    )
    .expect("mexec did not finish");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr_of(&output).contains("creating channel"));
}
