#![allow(dead_code)]

use std::io::Write;

use mexec::commands::{CommandLine, CommandStore};
use tempfile::NamedTempFile;

/// Builder for a pipeline description, either as a file on disk or as an
/// in-memory `CommandStore`.
#[derive(Debug, Clone)]
pub struct CommandFileBuilder {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl CommandFileBuilder {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            trailing_newline: true,
        }
    }

    pub fn stage(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn stages<'a>(mut self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        self.lines.extend(lines.into_iter().map(str::to_string));
        self
    }

    /// Leave out the newline after the last line.
    pub fn without_trailing_newline(mut self) -> Self {
        self.trailing_newline = false;
        self
    }

    /// The file contents this builder describes.
    pub fn contents(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    pub fn build_file(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp command file");
        file.write_all(self.contents().as_bytes())
            .expect("Failed to write temp command file");
        file.flush().expect("Failed to flush temp command file");
        file
    }

    pub fn build_store(&self) -> CommandStore {
        let mut store = CommandStore::new();
        for line in &self.lines {
            store
                .append(CommandLine::from(line.as_str()))
                .expect("Failed to append command line");
        }
        store
    }
}

impl Default for CommandFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
