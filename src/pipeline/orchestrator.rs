// src/pipeline/orchestrator.rs

//! Fork one process per stage and hand the result to the reaper.

use nix::unistd::{ForkResult, fork};
use tracing::{debug, error, info};

use crate::commands::CommandStore;
use crate::errors::{MexecError, Result};
use crate::pipeline::reaper::{self, PipelineResult, SpawnedStage};
use crate::pipeline::stage::run_stage;
use crate::pipeline::topology::PipeTopology;

/// Run every command line of `store` as one pipeline and wait for it.
///
/// Must be called from a single-threaded process: the forked stages
/// tokenize and allocate before they exec.
pub fn run_pipeline(store: &CommandStore) -> Result<PipelineResult> {
    let count = store.count();
    if count == 0 {
        info!("no command lines; nothing to run");
        return Ok(PipelineResult::default());
    }

    let mut topology = PipeTopology::build(count)?;
    info!(stages = count, channels = topology.len(), "starting pipeline");

    let spawned = spawn_stages(store, &mut topology)?;
    let result = reaper::reap(&spawned, &mut topology)?;

    info!(
        stages = count,
        success = result.success(),
        failed = ?result.failed_stages(),
        "pipeline finished"
    );
    Ok(result)
}

/// Fork every stage in order. Only the orchestrator returns from here.
///
/// On a fork failure the orchestrator drops its endpoints, kills and reaps
/// the stages spawned so far, and reports the failing stage.
fn spawn_stages(store: &CommandStore, topology: &mut PipeTopology) -> Result<Vec<SpawnedStage>> {
    let count = store.count();
    let mut spawned = Vec::new();
    spawned
        .try_reserve_exact(count)
        .map_err(|source| MexecError::Allocation {
            what: "stage table",
            source,
        })?;

    for (index, line) in store.iter().enumerate() {
        // SAFETY: the orchestrator runs no other threads, so the child starts
        // from a consistent copy of this process.
        match unsafe { fork() } {
            Ok(ForkResult::Child) => run_stage(index, count, line, topology),
            Ok(ForkResult::Parent { child }) => {
                debug!(stage = index, pid = %child, "stage spawned");
                spawned.push(SpawnedStage { index, pid: child });
            }
            Err(source) => {
                error!(stage = index, error = %source, "fork failed");
                topology.retain(&[]);
                reaper::terminate(&spawned);
                return Err(MexecError::Spawn {
                    stage: index,
                    source,
                });
            }
        }
    }

    Ok(spawned)
}
