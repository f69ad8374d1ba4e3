use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use p3d_container::{Container, ContainerIo};
use tracing::{debug, info, warn};

use crate::config::MergeConfig;
use crate::equality::contains_equal;
use crate::error::{MergeError, MergeResult, MergeWarning};
use crate::history::{HistoryAnnotator, Invocation};
use crate::sort::{sort_chunks, SortOptions};

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// Stages of a merge run, in the only order they may be entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Ready,
    Loading,
    Merging,
    Sorting,
    Annotating,
    Serializing,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Loading => "loading",
            Self::Merging => "merging",
            Self::Sorting => "sorting",
            Self::Annotating => "annotating",
            Self::Serializing => "serializing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// MergeReport
// ---------------------------------------------------------------------------

/// Summary of a completed merge run.
#[derive(Clone, Debug, Default)]
pub struct MergeReport {
    /// Number of input files merged.
    pub inputs: usize,
    /// Top-level chunks read across all inputs.
    pub chunks_read: usize,
    /// Top-level chunks in the written output, including added ones.
    pub chunks_written: usize,
    /// Top-level chunks omitted as duplicates.
    pub duplicates_skipped: usize,
    /// Section header chunks inserted by sorting.
    pub section_headers: usize,
    /// Whether a run-level history chunk was added.
    pub history_added: bool,
    /// Whether the output was compressed.
    pub compressed: bool,
    /// Non-fatal warnings raised during the run.
    pub warnings: Vec<MergeWarning>,
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Deduplication
// ---------------------------------------------------------------------------

/// Move the chunks of `input` onto the end of `output`.
///
/// With `dedupe` set, a chunk equal to one already in `output` (including
/// chunks appended earlier in this call) is dropped instead. Returns the
/// number of dropped chunks.
pub fn append_chunks(output: &mut Container, input: Container, dedupe: bool) -> usize {
    let mut skipped = 0;
    for chunk in input.into_chunks() {
        if dedupe && contains_equal(output.chunks(), &chunk) {
            debug!(tag = %chunk.tag(), "skipping duplicate chunk");
            skipped += 1;
            continue;
        }
        output.push(chunk);
    }
    skipped
}

// ---------------------------------------------------------------------------
// MergePipeline
// ---------------------------------------------------------------------------

/// Merges input containers into one output container.
///
/// A run moves strictly forward through
/// `Ready -> Loading -> Merging -> Sorting? -> Annotating? -> Serializing -> Done`.
/// Every failure aborts the run; nothing is written unless all inputs load.
pub struct MergePipeline<'io> {
    config: MergeConfig,
    io: &'io dyn ContainerIo,
    annotator: HistoryAnnotator,
    invocation: Invocation,
    timestamp: Option<DateTime<Utc>>,
    state: PipelineState,
    inputs: Vec<Container>,
    output: Container,
    report: MergeReport,
}

impl<'io> MergePipeline<'io> {
    /// Create a pipeline reading and writing through `io`.
    pub fn new(config: MergeConfig, io: &'io dyn ContainerIo) -> Self {
        Self {
            config,
            io,
            annotator: HistoryAnnotator::default(),
            invocation: Invocation::from_env(),
            timestamp: None,
            state: PipelineState::Ready,
            inputs: Vec::new(),
            output: Container::new(),
            report: MergeReport::default(),
        }
    }

    /// The command line recorded in the history chunk. Defaults to the
    /// current process invocation.
    pub fn with_invocation(mut self, invocation: Invocation) -> Self {
        self.invocation = invocation;
        self
    }

    /// Override the tool identity recorded in the history chunk.
    pub fn with_annotator(mut self, annotator: HistoryAnnotator) -> Self {
        self.annotator = annotator;
        self
    }

    /// Fix the history timestamp instead of reading the clock.
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The output accumulator.
    pub fn output(&self) -> &Container {
        &self.output
    }

    /// Run every stage, merging `inputs` in order into `output_path`.
    pub fn run<P: AsRef<Path>>(&mut self, inputs: &[P], output_path: &Path) -> MergeResult<MergeReport> {
        if self.state != PipelineState::Ready {
            return Err(MergeError::InvalidState {
                current: self.state,
                next: PipelineState::Loading,
            });
        }
        let started = Instant::now();

        self.preflight(inputs.len(), output_path)?;
        for warning in self.config.warnings() {
            warn!(%warning, "configuration warning");
            self.report.warnings.push(warning);
        }

        self.load(inputs)?;
        self.merge()?;
        if let Some(options) = self.config.sort.options() {
            self.sort(options)?;
        }
        if !self.config.skip_history {
            self.annotate()?;
        }
        self.serialize(output_path)?;
        self.enter(PipelineState::Done)?;

        self.report.elapsed = started.elapsed();
        info!(
            inputs = self.report.inputs,
            chunks = self.report.chunks_written,
            duplicates = self.report.duplicates_skipped,
            elapsed_ms = self.report.elapsed.as_millis() as u64,
            "merge complete"
        );
        Ok(self.report.clone())
    }

    fn enter(&mut self, next: PipelineState) -> MergeResult<()> {
        if next <= self.state {
            return Err(MergeError::InvalidState {
                current: self.state,
                next,
            });
        }
        self.state = next;
        Ok(())
    }

    fn preflight(&self, input_count: usize, output_path: &Path) -> MergeResult<()> {
        if input_count == 0 {
            return Err(MergeError::NoInputs);
        }
        if !self.config.force_overwrite && self.io.exists(output_path) {
            return Err(MergeError::OutputExists(output_path.to_path_buf()));
        }
        Ok(())
    }

    fn load<P: AsRef<Path>>(&mut self, inputs: &[P]) -> MergeResult<()> {
        self.enter(PipelineState::Loading)?;
        for path in inputs {
            let path = path.as_ref();
            info!(
                path = %path.display(),
                dedupe = self.config.dedupe,
                "reading input"
            );
            let container = self.io.load(path).map_err(|source| MergeError::InputParse {
                path: PathBuf::from(path),
                source,
            })?;
            self.report.chunks_read += container.len();
            self.inputs.push(container);
        }
        self.report.inputs = self.inputs.len();
        Ok(())
    }

    fn merge(&mut self) -> MergeResult<()> {
        self.enter(PipelineState::Merging)?;
        for input in std::mem::take(&mut self.inputs) {
            self.report.duplicates_skipped += append_chunks(&mut self.output, input, self.config.dedupe);
        }
        debug!(
            chunks = self.output.len(),
            duplicates = self.report.duplicates_skipped,
            "inputs merged"
        );
        Ok(())
    }

    fn sort(&mut self, options: SortOptions) -> MergeResult<()> {
        self.enter(PipelineState::Sorting)?;
        info!(
            alphabetical = options.alphabetical,
            section_headers = options.include_section_headers,
            "sorting chunks"
        );
        let chunks = std::mem::take(&mut self.output).into_chunks();
        let before = chunks.len();
        let sorted = sort_chunks(chunks, options)?;
        self.report.section_headers = sorted.len() - before;
        self.output = Container::from_chunks(sorted);
        Ok(())
    }

    fn annotate(&mut self) -> MergeResult<()> {
        self.enter(PipelineState::Annotating)?;
        info!("adding history chunk");
        let at = self.timestamp.unwrap_or_else(Utc::now);
        self.annotator.annotate(&mut self.output, &self.invocation, at)?;
        self.report.history_added = true;
        Ok(())
    }

    fn serialize(&mut self, output_path: &Path) -> MergeResult<()> {
        self.enter(PipelineState::Serializing)?;
        let compressed = self.config.compress;
        info!(path = %output_path.display(), compressed, "writing output");
        self.io
            .write(&self.output, output_path, compressed)
            .map_err(|source| MergeError::OutputWrite {
                path: output_path.to_path_buf(),
                source,
            })?;
        self.report.chunks_written = self.output.len();
        self.report.compressed = compressed;
        Ok(())
    }
}
