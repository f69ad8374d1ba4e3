use std::fmt;
use std::path::PathBuf;

use p3d_chunk::ChunkError;
use p3d_container::ContainerError;

use crate::pipeline::PipelineState;

/// Fatal errors that abort a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// No input files were given.
    #[error("no input files given")]
    NoInputs,

    /// The output exists and overwriting was not allowed.
    #[error("output file {} already exists; enable force overwrite to replace it", .0.display())]
    OutputExists(PathBuf),

    /// An input is not a valid container. Raised before any merge work.
    #[error("failed to load input {}: {source}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    /// The output could not be written. No partial file is left behind.
    #[error("failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    /// A history or section header chunk could not be encoded.
    #[error("history chunk error: {0}")]
    History(#[from] ChunkError),

    /// A stage was entered out of order.
    #[error("cannot enter {next} while pipeline is {current}")]
    InvalidState {
        current: PipelineState,
        next: PipelineState,
    },

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Non-fatal conditions reported alongside a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeWarning {
    /// Sort sub-options were set while sorting itself is off; they are ignored.
    SortFlagsWithoutSort {
        alphabetical: bool,
        include_section_headers: bool,
    },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SortFlagsWithoutSort {
                alphabetical,
                include_section_headers,
            } => {
                let flags = match (alphabetical, include_section_headers) {
                    (true, true) => "sort alphabetical and sort include sections were",
                    (true, false) => "sort alphabetical was",
                    _ => "sort include sections was",
                };
                write!(f, "{flags} specified without enabling sorting; ignoring")
            }
        }
    }
}
