// src/pipeline/wiring.rs

//! Which channel endpoints a stage adopts as its stdin/stdout.

use std::fmt;

use crate::pipeline::topology::Endpoint;

/// Channel indices a stage reads from and writes to.
///
/// `None` means the stream is inherited from the orchestrator unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageWiring {
    pub stdin: Option<usize>,
    pub stdout: Option<usize>,
}

impl StageWiring {
    /// Wiring of stage `index` in a pipeline of `count` stages.
    ///
    /// The first stage keeps the orchestrator's stdin, the last keeps its
    /// stdout; a single stage keeps both.
    pub fn for_stage(index: usize, count: usize) -> Self {
        Self {
            stdin: (index > 0).then(|| index - 1),
            stdout: (index + 1 < count).then_some(index),
        }
    }

    /// The endpoints to retain, read end first.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.stdin
            .map(Endpoint::read)
            .into_iter()
            .chain(self.stdout.map(Endpoint::write))
            .collect()
    }

    pub fn is_passthrough(&self) -> bool {
        self.stdin.is_none() && self.stdout.is_none()
    }
}

impl fmt::Display for StageWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stdin {
            Some(c) => write!(f, "stdin=channel {c}")?,
            None => f.write_str("stdin=inherited")?,
        }
        match self.stdout {
            Some(c) => write!(f, " stdout=channel {c}"),
            None => f.write_str(" stdout=inherited"),
        }
    }
}
