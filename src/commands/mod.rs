// src/commands/mod.rs

//! Command lines and their argument vectors.
//!
//! - [`store`] holds the raw command lines, one per pipeline stage.
//! - [`tokenizer`] splits one line into the argument vector handed to
//!   `execvp`.

pub mod store;
pub mod tokenizer;

pub use store::{CommandLine, CommandStore};
pub use tokenizer::{ArgumentVector, tokenize};
