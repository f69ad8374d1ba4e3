use crate::tag::ChunkTag;

/// Errors from chunk payload encoding and decoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChunkError {
    /// A string does not fit in a one-byte length prefix.
    #[error("string of {len} bytes exceeds the 255 byte limit")]
    StringTooLong { len: usize },

    /// A payload ended before a field could be read.
    #[error("truncated payload while reading {what}")]
    Truncated { what: String },

    /// Too many lines for the `u16` line count of a history chunk.
    #[error("history chunk cannot hold {0} lines")]
    TooManyLines(usize),

    /// The chunk has a different kind than the caller expected.
    #[error("expected {expected} chunk, got {actual}")]
    UnexpectedTag { expected: ChunkTag, actual: ChunkTag },
}

impl ChunkError {
    pub(crate) fn truncated(what: impl Into<String>) -> Self {
        Self::Truncated { what: what.into() }
    }
}

/// Result alias for chunk operations.
pub type ChunkResult<T> = Result<T, ChunkError>;
