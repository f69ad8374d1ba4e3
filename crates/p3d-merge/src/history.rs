//! Run-level provenance annotation.
//!
//! The history chunk records the tool identity, the command line that
//! produced the file and when it ran. It is inserted as the first top-level
//! chunk of the output, after any sorting.

use std::path::Path;

use chrono::{DateTime, Utc};
use p3d_chunk::{history_chunk, Chunk, ChunkResult, MAX_STRING_LEN};
use p3d_container::Container;

/// Longest history line, in bytes.
pub const MAX_LINE_LEN: usize = MAX_STRING_LEN;

/// The program name and arguments a run was started with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Capture the current process invocation.
    ///
    /// Only the file name of the program path is kept. Non-UTF-8 arguments
    /// are converted lossily.
    pub fn from_env() -> Self {
        let mut raw = std::env::args_os();
        let program = raw
            .next()
            .map(|p| {
                Path::new(&p)
                    .file_name()
                    .unwrap_or(p.as_os_str())
                    .to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_default();
        let args = raw.map(|a| a.to_string_lossy().into_owned()).collect();
        Self { program, args }
    }

    /// The command line split into lines of at most [`MAX_LINE_LEN`] bytes.
    ///
    /// Arguments containing a space are quoted. Each argument is preceded by
    /// a single space; when the next argument does not fit, the current line
    /// is closed and the argument starts a new one. An argument longer than
    /// a whole line is split at character boundaries.
    pub fn command_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        push_piece(&mut lines, &mut current, &self.program);
        for arg in &self.args {
            let piece = if arg.contains(' ') {
                format!(" \"{arg}\"")
            } else {
                format!(" {arg}")
            };
            push_piece(&mut lines, &mut current, &piece);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

fn push_piece(lines: &mut Vec<String>, current: &mut String, piece: &str) {
    if !current.is_empty() && current.len() + piece.len() > MAX_LINE_LEN {
        lines.push(std::mem::take(current));
    }
    let mut rest = piece;
    while current.len() + rest.len() > MAX_LINE_LEN {
        let mut cut = MAX_LINE_LEN - current.len();
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        current.push_str(&rest[..cut]);
        lines.push(std::mem::take(current));
        rest = &rest[cut..];
    }
    current.push_str(rest);
}

/// Builds history chunks identifying this tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryAnnotator {
    tool: String,
    version: String,
}

impl Default for HistoryAnnotator {
    fn default() -> Self {
        Self::new("p3dtool", env!("CARGO_PKG_VERSION"))
    }
}

impl HistoryAnnotator {
    pub fn new(tool: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            version: version.into(),
        }
    }

    /// The history lines for a run of `invocation` at `at`.
    pub fn lines(&self, invocation: &Invocation, at: DateTime<Utc>) -> Vec<String> {
        let mut lines = vec![format!("Generated with {} v{}.", self.tool, self.version)];
        lines.extend(invocation.command_lines());
        lines.push(format!("Run at {}.", at.format("%a, %d %b %Y %H:%M:%S GMT")));
        lines
    }

    /// Build the history chunk for a run.
    pub fn build(&self, invocation: &Invocation, at: DateTime<Utc>) -> ChunkResult<Chunk> {
        history_chunk(&self.lines(invocation, at))
    }

    /// Insert the history chunk as the first chunk of `output`.
    pub fn annotate(&self, output: &mut Container, invocation: &Invocation, at: DateTime<Utc>) -> ChunkResult<()> {
        let chunk = self.build(invocation, at)?;
        output.insert(0, chunk);
        Ok(())
    }
}
