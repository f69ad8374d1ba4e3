use std::path::{Path, PathBuf};

use p3d_chunk::{Chunk, CHUNK_HEADER_SIZE};

/// An ordered sequence of top-level chunks plus file metadata.
#[derive(Clone, Debug, Default)]
pub struct Container {
    source: Option<PathBuf>,
    chunks: Vec<Chunk>,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding `chunks`.
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self {
            source: None,
            chunks,
        }
    }

    /// Record the file this container was loaded from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// The file this container was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Append a top-level chunk.
    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Insert a top-level chunk at `index`, shifting later chunks back.
    pub fn insert(&mut self, index: usize, chunk: Chunk) {
        self.chunks.insert(index, chunk);
    }

    /// Move the top-level chunks out of the container.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Size of the encoded, uncompressed file in bytes.
    pub fn total_size(&self) -> u64 {
        CHUNK_HEADER_SIZE + self.chunks.iter().map(Chunk::total_size).sum::<u64>()
    }
}
