// src/pipeline/stage.rs

//! Code that runs inside a freshly forked stage process.
//!
//! Nothing here returns to the orchestrator: the stage either becomes its
//! target program via `execvp` or reports why it could not and exits 1.

use std::convert::Infallible;
use std::os::fd::{AsRawFd, IntoRawFd, OwnedFd};

use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::unistd::{dup2, execvp};
use tracing::debug;

use crate::commands::{CommandLine, tokenize};
use crate::errors::LaunchError;
use crate::pipeline::topology::{End, Endpoint, PipeTopology};
use crate::pipeline::wiring::StageWiring;

/// Exit status of a stage that failed to launch.
pub const LAUNCH_FAILURE: i32 = 1;

/// Turn this process into stage `index` of `count`.
pub fn run_stage(
    index: usize,
    count: usize,
    line: &CommandLine,
    topology: &mut PipeTopology,
) -> ! {
    match launch(index, count, line, topology) {
        Ok(never) => match never {},
        Err(err) => {
            debug!(stage = index, error = %err, "stage launch failed");
            eprintln!("mexec: stage {index}: {err}");
            std::process::exit(LAUNCH_FAILURE)
        }
    }
}

fn launch(
    index: usize,
    count: usize,
    line: &CommandLine,
    topology: &mut PipeTopology,
) -> Result<Infallible, LaunchError> {
    let argv = tokenize(line)?;

    let wiring = StageWiring::for_stage(index, count);
    let kept = topology.retain(&wiring.endpoints());
    adopt(kept)?;

    let program = argv.program().ok_or(LaunchError::EmptyCommand)?;
    restore_sigpipe()?;
    debug!(stage = index, %wiring, %argv, "exec");

    execvp(program, argv.args()).map_err(|source| LaunchError::Exec {
        program: program.to_string_lossy().into_owned(),
        source,
    })
}

/// The Rust runtime ignores SIGPIPE and ignored signals survive exec.
/// Stages must die on a closed reader like they would under a shell.
fn restore_sigpipe() -> Result<(), LaunchError> {
    // SAFETY: installs the default disposition, no handler code runs.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) }
        .map(|_| ())
        .map_err(|source| LaunchError::Signal { source })
}

/// Move the retained endpoints onto stdin/stdout.
///
/// The original descriptor is closed once duplicated, unless it already is
/// the standard stream.
fn adopt(kept: Vec<(Endpoint, OwnedFd)>) -> Result<(), LaunchError> {
    for (endpoint, fd) in kept {
        let (target, stream) = match endpoint.end {
            End::Read => (STDIN_FILENO, "stdin"),
            End::Write => (STDOUT_FILENO, "stdout"),
        };

        if fd.as_raw_fd() == target {
            let _ = fd.into_raw_fd();
            continue;
        }

        dup2(fd.as_raw_fd(), target).map_err(|source| LaunchError::Redirect { stream, source })?;
    }

    Ok(())
}
