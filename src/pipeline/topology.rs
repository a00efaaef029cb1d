// src/pipeline/topology.rs

//! Channels between adjacent stages.
//!
//! Channel `i` carries stage `i`'s stdout to stage `i + 1`'s stdin, so a
//! pipeline of `N` stages has `N - 1` channels. Every endpoint is an
//! [`OwnedFd`]: releasing an endpoint is dropping it.

use std::os::fd::OwnedFd;

use nix::unistd::pipe;
use tracing::{debug, error};

use crate::errors::{MexecError, Result};

/// Direction of a channel endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum End {
    Read,
    Write,
}

/// One endpoint of one channel, identified by channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub channel: usize,
    pub end: End,
}

impl Endpoint {
    pub fn read(channel: usize) -> Self {
        Self {
            channel,
            end: End::Read,
        }
    }

    pub fn write(channel: usize) -> Self {
        Self {
            channel,
            end: End::Write,
        }
    }
}

#[derive(Debug)]
struct Channel {
    read: Option<OwnedFd>,
    write: Option<OwnedFd>,
}

impl Channel {
    fn slot(&mut self, end: End) -> &mut Option<OwnedFd> {
        match end {
            End::Read => &mut self.read,
            End::Write => &mut self.write,
        }
    }
}

/// All channels of one pipeline, indexable by channel number.
#[derive(Debug, Default)]
pub struct PipeTopology {
    channels: Vec<Channel>,
}

impl PipeTopology {
    /// Create the `stages - 1` channels for a pipeline of `stages` stages.
    ///
    /// If a channel cannot be created, the ones already created are closed
    /// before the error is returned.
    pub fn build(stages: usize) -> Result<Self> {
        let count = stages.saturating_sub(1);

        let mut channels = Vec::new();
        channels
            .try_reserve_exact(count)
            .map_err(|source| MexecError::Allocation {
                what: "channel table",
                source,
            })?;

        for index in 0..count {
            match pipe() {
                Ok((read, write)) => channels.push(Channel {
                    read: Some(read),
                    write: Some(write),
                }),
                Err(source) => {
                    error!(channel = index, error = %source, "pipe creation failed");
                    drop(channels);
                    return Err(MexecError::ChannelCreation { index, source });
                }
            }
        }

        debug!(channels = count, "pipe topology built");
        Ok(Self { channels })
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn is_open(&self, endpoint: Endpoint) -> bool {
        self.channels.get(endpoint.channel).is_some_and(|c| match endpoint.end {
            End::Read => c.read.is_some(),
            End::Write => c.write.is_some(),
        })
    }

    /// Number of endpoints this process still holds.
    pub fn open_endpoints(&self) -> usize {
        self.channels
            .iter()
            .map(|c| usize::from(c.read.is_some()) + usize::from(c.write.is_some()))
            .sum()
    }

    /// Close every endpoint except those in `keep`, and hand the kept ones
    /// over to the caller.
    ///
    /// Afterwards the topology holds nothing. Kept endpoints come back in
    /// channel order, read end before write end. The orchestrator calls this
    /// with an empty `keep`; a stage calls it with its own wiring.
    pub fn retain(&mut self, keep: &[Endpoint]) -> Vec<(Endpoint, OwnedFd)> {
        let mut kept = Vec::with_capacity(keep.len());

        for (index, channel) in self.channels.iter_mut().enumerate() {
            for end in [End::Read, End::Write] {
                let endpoint = Endpoint {
                    channel: index,
                    end,
                };
                let Some(fd) = channel.slot(end).take() else {
                    continue;
                };
                if keep.contains(&endpoint) {
                    kept.push((endpoint, fd));
                }
            }
        }

        kept
    }
}
