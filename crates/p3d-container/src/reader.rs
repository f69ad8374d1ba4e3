use p3d_chunk::Chunk;

use crate::compress::{decompress, is_compressed};
use crate::container::Container;
use crate::error::{ContainerError, ContainerResult};

pub const P3D_MAGIC: u32 = 0xFF44_3350;
/// [`P3D_MAGIC`] as seen in a byte-swapped (big-endian) file.
pub const P3D_MAGIC_SWAPPED: u32 = 0x5033_44FF;
pub const FILE_HEADER_SIZE: usize = 12;
pub const MAX_DEPTH: usize = 256;

const HEADER_SIZE: usize = 12;

/// Decode a container from raw file bytes, decompressing if needed.
pub fn decode_container(data: &[u8]) -> ContainerResult<Container> {
    if is_compressed(data) {
        let raw = decompress(data)?;
        return parse_container(&raw);
    }
    parse_container(data)
}

/// Parse an uncompressed container.
pub fn parse_container(data: &[u8]) -> ContainerResult<Container> {
    let (magic, header_size, total_size) = read_header(data, 0)?;
    match magic {
        P3D_MAGIC => {}
        P3D_MAGIC_SWAPPED => return Err(ContainerError::BigEndian),
        actual => return Err(ContainerError::InvalidMagic { actual }),
    }
    if header_size as usize != FILE_HEADER_SIZE {
        return Err(ContainerError::CorruptChunk {
            offset: 0,
            reason: format!("file header size is {header_size}, expected {FILE_HEADER_SIZE}"),
        });
    }

    let total = total_size as usize;
    if total < FILE_HEADER_SIZE {
        return Err(ContainerError::CorruptChunk {
            offset: 0,
            reason: format!("file total size {total} is smaller than its header"),
        });
    }
    if total > data.len() {
        return Err(ContainerError::Truncated {
            offset: data.len() as u64,
            reason: format!("file declares {total} bytes, only {} present", data.len()),
        });
    }
    if total < data.len() {
        return Err(ContainerError::TrailingData {
            offset: total as u64,
            len: (data.len() - total) as u64,
        });
    }

    let chunks = parse_children(data, FILE_HEADER_SIZE, total, 1)?;
    Ok(Container::from_chunks(chunks))
}

/// Parse consecutive chunks occupying exactly `start..end`.
fn parse_children(data: &[u8], start: usize, end: usize, depth: usize) -> ContainerResult<Vec<Chunk>> {
    let mut children = Vec::new();
    let mut pos = start;
    while pos < end {
        if depth > MAX_DEPTH {
            return Err(ContainerError::TooDeep {
                offset: pos as u64,
                max_depth: MAX_DEPTH,
            });
        }
        let (chunk, next) = parse_chunk(data, pos, end, depth)?;
        children.push(chunk);
        pos = next;
    }
    Ok(children)
}

/// Parse one chunk at `offset` that must end no later than `limit`.
/// Returns the chunk and the offset just past it.
fn parse_chunk(data: &[u8], offset: usize, limit: usize, depth: usize) -> ContainerResult<(Chunk, usize)> {
    if offset + HEADER_SIZE > limit {
        return Err(ContainerError::Truncated {
            offset: offset as u64,
            reason: "chunk header extends beyond its parent".into(),
        });
    }
    let (tag, data_size, total_size) = read_header(data, offset)?;
    let (data_size, total_size) = (data_size as usize, total_size as usize);

    if data_size < HEADER_SIZE {
        return Err(ContainerError::CorruptChunk {
            offset: offset as u64,
            reason: format!("data size {data_size} is smaller than the chunk header"),
        });
    }
    if total_size < data_size {
        return Err(ContainerError::CorruptChunk {
            offset: offset as u64,
            reason: format!("total size {total_size} is smaller than data size {data_size}"),
        });
    }
    let end = offset + total_size;
    if end > limit {
        return Err(ContainerError::Truncated {
            offset: offset as u64,
            reason: format!("chunk of {total_size} bytes extends beyond its parent"),
        });
    }

    let payload = data[offset + HEADER_SIZE..offset + data_size].to_vec();
    let children = parse_children(data, offset + data_size, end, depth + 1)?;
    Ok((Chunk::with_children(tag, payload, children), end))
}

fn read_header(data: &[u8], offset: usize) -> ContainerResult<(u32, u32, u32)> {
    let header = data
        .get(offset..offset + HEADER_SIZE)
        .ok_or_else(|| ContainerError::Truncated {
            offset: offset as u64,
            reason: "header too short".into(),
        })?;
    let word = |i: usize| u32::from_le_bytes([header[i], header[i + 1], header[i + 2], header[i + 3]]);
    Ok((word(0), word(4), word(8)))
}
