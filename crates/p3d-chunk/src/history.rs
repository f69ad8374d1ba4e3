//! History chunks: free-form text annotations.
//!
//! Payload layout: a `u16` line count followed by each line as a
//! length-prefixed string.

use crate::chunk::Chunk;
use crate::error::{ChunkError, ChunkResult};
use crate::string::{read_string, write_string};
use crate::tag::ChunkTag;

/// Build a history chunk holding `lines` in order.
pub fn history_chunk<S: AsRef<str>>(lines: &[S]) -> ChunkResult<Chunk> {
    let count = u16::try_from(lines.len()).map_err(|_| ChunkError::TooManyLines(lines.len()))?;
    let mut payload = Vec::with_capacity(2 + lines.iter().map(|l| 1 + l.as_ref().len()).sum::<usize>());
    payload.extend_from_slice(&count.to_le_bytes());
    for line in lines {
        write_string(&mut payload, line.as_ref())?;
    }
    Ok(Chunk::new(ChunkTag::HISTORY, payload))
}

/// Decode the lines of a history chunk.
pub fn history_lines(chunk: &Chunk) -> ChunkResult<Vec<String>> {
    if !chunk.tag().is_history() {
        return Err(ChunkError::UnexpectedTag {
            expected: ChunkTag::HISTORY,
            actual: chunk.tag(),
        });
    }
    let payload = chunk.payload();
    let count_bytes: [u8; 2] = payload
        .get(..2)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| ChunkError::truncated("history line count"))?;
    let count = u16::from_le_bytes(count_bytes) as usize;

    let mut lines = Vec::with_capacity(count);
    let mut pos = 2;
    for _ in 0..count {
        let (line, consumed) = read_string(&payload[pos..])?;
        pos += consumed;
        lines.push(line);
    }
    Ok(lines)
}
