// src/commands/store.rs

//! Ordered, append-only store of raw command lines.

use std::fmt;
use std::io::BufRead;

use tracing::debug;

use crate::errors::{MexecError, Result};

/// One raw command line, i.e. one pipeline stage, without its newline.
///
/// Kept as bytes: command lines are handed to the OS verbatim and need not
/// be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(Vec<u8>);

impl CommandLine {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for CommandLine {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Command lines in pipeline order.
///
/// Write-once: lines are appended while reading input and never removed or
/// changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct CommandStore {
    lines: Vec<CommandLine>,
}

impl CommandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every line of `reader` into a new store.
    ///
    /// Lines are split on `\n`; a trailing `\r` is dropped and the last line
    /// does not need a terminating newline.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut store = Self::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(MexecError::Read)?;
            if n == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
            store.append(CommandLine::new(buf.as_slice()))?;
        }

        debug!(stages = store.count(), "command lines read");
        Ok(store)
    }

    /// Append one line. Fails only if the backing storage cannot grow.
    pub fn append(&mut self, line: CommandLine) -> Result<()> {
        self.lines
            .try_reserve(1)
            .map_err(|source| MexecError::Allocation {
                what: "command store",
                source,
            })?;
        self.lines.push(line);
        Ok(())
    }

    /// Number of stages.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommandLine> {
        self.lines.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandLine> {
        self.lines.iter()
    }
}
