// src/lib.rs

pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod pipeline;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::commands::{CommandStore, tokenize};
use crate::errors::{MexecError, Result};
use crate::pipeline::{PipelineResult, StageWiring, run_pipeline};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - reading command lines from the file or stdin
/// - the optional dry run
/// - the pipeline engine
///
/// The input file is closed before any stage is spawned.
pub fn run(args: &CliArgs) -> Result<PipelineResult> {
    let store = read_commands(args.file.as_deref())?;

    if args.dry_run {
        print_dry_run(&store);
        return Ok(PipelineResult::default());
    }

    let result = run_pipeline(&store)?;
    if !result.success() {
        warn!(failed = ?result.failed_stages(), "pipeline failed");
    }
    Ok(result)
}

/// Read the command lines from `path`, or from stdin when `None`.
pub fn read_commands(path: Option<&Path>) -> Result<CommandStore> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "reading command lines");
            let file = File::open(path).map_err(|source| MexecError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            CommandStore::read_from(BufReader::new(file))
        }
        None => {
            info!("reading command lines from stdin");
            CommandStore::read_from(std::io::stdin().lock())
        }
    }
}

/// Simple dry-run output: one line per stage with its argv and wiring.
fn print_dry_run(store: &CommandStore) {
    let count = store.count();
    println!("mexec dry-run");
    println!("stages ({count}), channels ({}):", count.saturating_sub(1));

    for (index, line) in store.iter().enumerate() {
        let wiring = StageWiring::for_stage(index, count);
        match tokenize(line) {
            Ok(argv) if argv.is_empty() => println!("  [{index}] <empty> {wiring}"),
            Ok(argv) => println!("  [{index}] {argv} {wiring}"),
            Err(e) => println!("  [{index}] <invalid: {e}> {wiring}"),
        }
    }
}
