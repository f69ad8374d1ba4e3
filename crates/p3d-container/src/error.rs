use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("invalid container magic: 0x{actual:08X}")]
    InvalidMagic { actual: u32 },

    #[error("big-endian containers are not supported")]
    BigEndian,

    #[error("corrupt chunk at offset {offset}: {reason}")]
    CorruptChunk { offset: u64, reason: String },

    #[error("truncated data at offset {offset}: {reason}")]
    Truncated { offset: u64, reason: String },

    #[error("{len} trailing bytes after container end at offset {offset}")]
    TrailingData { offset: u64, len: u64 },

    #[error("chunk nesting exceeds {max_depth} levels at offset {offset}")]
    TooDeep { offset: u64, max_depth: usize },

    #[error("{what} of {size} bytes does not fit in a 32-bit size field")]
    TooLarge { what: String, size: u64 },

    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("compression failed: {0}")]
    CompressionFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ContainerResult<T> = Result<T, ContainerError>;
