// src/errors.rs

//! Crate-wide error types.
//!
//! [`MexecError`] covers every failure that is fatal for the whole
//! invocation and is reported by the orchestrating process. [`LaunchError`]
//! is local to a single stage: it is reported by the stage process itself,
//! which then exits nonzero, and never reaches the orchestrator.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MexecError {
    #[error("failed to grow {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading command lines: {0}")]
    Read(#[source] std::io::Error),

    #[error("creating channel {index}: {source}")]
    ChannelCreation {
        index: usize,
        #[source]
        source: nix::Error,
    },

    #[error("spawning stage {stage}: {source}")]
    Spawn {
        stage: usize,
        #[source]
        source: nix::Error,
    },

    #[error("waiting for stages: {0}")]
    Wait(#[source] nix::Error),
}

/// Why a single stage could not become its target program.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("argument {index} contains a NUL byte")]
    NulByte { index: usize },

    #[error("redirecting {stream}: {source}")]
    Redirect {
        stream: &'static str,
        #[source]
        source: nix::Error,
    },

    #[error("restoring default SIGPIPE handling: {source}")]
    Signal {
        #[source]
        source: nix::Error,
    },

    #[error("{program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: nix::Error,
    },
}

pub type Result<T> = std::result::Result<T, MexecError>;
