// src/pipeline/mod.rs

//! Process pipeline engine.
//!
//! - [`topology`] creates the channels between adjacent stages and owns
//!   their endpoints.
//! - [`wiring`] decides which endpoints a given stage adopts.
//! - [`orchestrator`] forks one process per stage.
//! - [`stage`] runs inside each forked process: rewire, close, exec.
//! - [`reaper`] closes the orchestrator's endpoints and collects every
//!   stage's termination into a [`PipelineResult`].
//!
//! Stages synchronise only through channel blocking; the orchestrator
//! blocks once, in the reaper, until every stage has terminated.

pub mod orchestrator;
pub mod reaper;
pub mod stage;
pub mod topology;
pub mod wiring;

pub use orchestrator::run_pipeline;
pub use reaper::{PipelineResult, SpawnedStage, StageOutcome};
pub use topology::{End, Endpoint, PipeTopology};
pub use wiring::StageWiring;
