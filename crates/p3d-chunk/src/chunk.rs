use crate::string::read_string;
use crate::tag::{ChunkTag, NameLayout};

/// Size in bytes of a chunk header: tag, data size, total size.
pub const CHUNK_HEADER_SIZE: u64 = 12;

/// A node in a container's chunk tree.
///
/// A chunk has a type tag, an opaque payload and an ordered list of child
/// chunks. The chunk never interprets its payload except to read a display
/// name for well-known tags.
#[derive(Clone, Debug)]
pub struct Chunk {
    tag: ChunkTag,
    payload: Vec<u8>,
    children: Vec<Chunk>,
}

impl Chunk {
    /// Create a chunk with no children.
    pub fn new(tag: impl Into<ChunkTag>, payload: Vec<u8>) -> Self {
        Self {
            tag: tag.into(),
            payload,
            children: Vec::new(),
        }
    }

    /// Create a chunk with the given children.
    pub fn with_children(tag: impl Into<ChunkTag>, payload: Vec<u8>, children: Vec<Chunk>) -> Self {
        Self {
            tag: tag.into(),
            payload,
            children,
        }
    }

    pub fn tag(&self) -> ChunkTag {
        self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn children(&self) -> &[Chunk] {
        &self.children
    }

    /// Append a child chunk.
    pub fn push_child(&mut self, child: Chunk) {
        self.children.push(child);
    }

    /// Returns `true` if this chunk has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Header plus payload, as written in the data size field.
    pub fn data_size(&self) -> u64 {
        CHUNK_HEADER_SIZE + self.payload.len() as u64
    }

    /// Data size plus the total size of every child.
    pub fn total_size(&self) -> u64 {
        self.data_size() + self.children.iter().map(Chunk::total_size).sum::<u64>()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Chunk::node_count).sum::<usize>()
    }

    /// The chunk's name, for kinds that store one in their payload.
    ///
    /// Returns `None` for unnamed kinds and for payloads too short to hold
    /// the name field.
    pub fn display_name(&self) -> Option<String> {
        let offset = match self.tag.name_layout()? {
            NameLayout::Leading => 0,
            NameLayout::AfterVersion => 4,
        };
        let (name, _) = read_string(self.payload.get(offset..)?).ok()?;
        Some(name)
    }
}
