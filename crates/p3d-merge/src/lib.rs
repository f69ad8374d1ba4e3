//! Chunk merge pipeline for Pure3D containers.
//!
//! Combines the top-level chunks of several containers into one output,
//! optionally dropping duplicates, sorting, and recording provenance.
//!
//! # Components
//!
//! - [`chunks_equal`] -- deep structural equality used for deduplication
//! - [`sort_chunks`] -- stable grouping by tag, optionally by name, with
//!   optional section headers
//! - [`HistoryAnnotator`] -- builds the run-level history chunk
//! - [`MergePipeline`] -- drives load, merge, sort, annotate and write
//!
//! All container access goes through [`p3d_container::ContainerIo`].

pub mod config;
pub mod equality;
pub mod error;
pub mod history;
pub mod pipeline;
pub mod sort;

pub use config::{MergeConfig, SortConfig};
pub use equality::{chunks_equal, contains_equal};
pub use error::{MergeError, MergeResult, MergeWarning};
pub use history::{HistoryAnnotator, Invocation, MAX_LINE_LEN};
pub use pipeline::{append_chunks, MergePipeline, MergeReport, PipelineState};
pub use sort::{section_header, sort_chunks, SortOptions};
