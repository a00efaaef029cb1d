// src/pipeline/reaper.rs

//! Collecting stage terminations in the orchestrating process.

use std::collections::HashMap;

use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::sys::wait::{WaitStatus, wait, waitpid};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::errors::{MexecError, Result};
use crate::pipeline::topology::PipeTopology;

/// A stage process the orchestrator has forked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedStage {
    pub index: usize,
    pub pid: Pid,
}

/// How one stage terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    /// Normal exit with a nonzero status.
    Exited(i32),
    Signaled(Signal),
}

impl StageOutcome {
    /// Terminal outcome carried by a wait status, if it is one.
    pub fn from_wait_status(status: WaitStatus) -> Option<(Pid, Self)> {
        match status {
            WaitStatus::Exited(pid, 0) => Some((pid, StageOutcome::Success)),
            WaitStatus::Exited(pid, code) => Some((pid, StageOutcome::Exited(code))),
            WaitStatus::Signaled(pid, signal, _) => Some((pid, StageOutcome::Signaled(signal))),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StageOutcome::Success)
    }
}

/// Outcome of a whole pipeline run, one entry per stage in stage order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    outcomes: Vec<StageOutcome>,
}

impl PipelineResult {
    pub fn from_outcomes(outcomes: Vec<StageOutcome>) -> Self {
        Self { outcomes }
    }

    /// True only if every stage exited normally with status 0.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(StageOutcome::is_success)
    }

    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    /// Indices of the stages that did not succeed.
    pub fn failed_stages(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_success())
            .map(|(i, _)| i)
            .collect()
    }

    /// Process exit status for this result: 0 or 1.
    pub fn exit_code(&self) -> u8 {
        if self.success() { 0 } else { 1 }
    }
}

/// Release every endpoint, then wait until every spawned stage terminated.
///
/// Terminations are taken in whatever order the OS reports them. A failing
/// stage does not stop the collection; a failing `wait` does.
pub fn reap(spawned: &[SpawnedStage], topology: &mut PipeTopology) -> Result<PipelineResult> {
    topology.retain(&[]);

    let mut stage_of: HashMap<Pid, usize> = spawned.iter().map(|s| (s.pid, s.index)).collect();
    let mut outcomes = vec![StageOutcome::Success; spawned.len()];

    while !stage_of.is_empty() {
        let status = match wait() {
            Ok(status) => status,
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(MexecError::Wait(e)),
        };

        let Some((pid, outcome)) = StageOutcome::from_wait_status(status) else {
            continue;
        };
        let Some(index) = stage_of.remove(&pid) else {
            debug!(%pid, "reaped a process that is not a stage");
            continue;
        };

        debug!(stage = index, %pid, ?outcome, "stage reaped");
        if !outcome.is_success() {
            warn!(stage = index, %pid, ?outcome, "stage failed");
        }
        outcomes[index] = outcome;
    }

    Ok(PipelineResult::from_outcomes(outcomes))
}

/// Kill and reap stages that were spawned before a fatal error.
pub fn terminate(spawned: &[SpawnedStage]) {
    for stage in spawned {
        if let Err(e) = kill(stage.pid, Signal::SIGKILL) {
            warn!(stage = stage.index, pid = %stage.pid, error = %e, "failed to kill stage");
        }
    }

    for stage in spawned {
        loop {
            match waitpid(stage.pid, None) {
                Err(Errno::EINTR) => continue,
                Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        debug!(stage = stage.index, pid = %stage.pid, "orphaned stage reaped");
    }
}
