//! Compressed container framing.
//!
//! Layout: magic `P3DZ` (`0x5A443350` little-endian), the uncompressed size
//! as `u32`, then a single zstd frame holding the plain container bytes.

use crate::error::{ContainerError, ContainerResult};

pub const P3DZ_MAGIC: u32 = 0x5A44_3350;

const FRAME_HEADER_SIZE: usize = 8;
const ZSTD_LEVEL: i32 = 19;

/// Returns `true` if `data` starts with the compressed container magic.
pub fn is_compressed(data: &[u8]) -> bool {
    data.get(..4)
        .map(|magic| magic == P3DZ_MAGIC.to_le_bytes())
        .unwrap_or(false)
}

/// Wrap plain container bytes in a compressed frame.
pub fn compress(raw: &[u8]) -> ContainerResult<Vec<u8>> {
    let size = u32::try_from(raw.len()).map_err(|_| ContainerError::TooLarge {
        what: "uncompressed container".into(),
        size: raw.len() as u64,
    })?;
    let compressed = zstd::encode_all(raw, ZSTD_LEVEL)
        .map_err(|e| ContainerError::CompressionFailed(e.to_string()))?;

    let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + compressed.len());
    out.extend_from_slice(&P3DZ_MAGIC.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Unwrap a compressed frame back into plain container bytes.
pub fn decompress(data: &[u8]) -> ContainerResult<Vec<u8>> {
    if data.len() < FRAME_HEADER_SIZE {
        return Err(ContainerError::Truncated {
            offset: 0,
            reason: "compressed header too short".into(),
        });
    }
    if !is_compressed(data) {
        return Err(ContainerError::InvalidMagic {
            actual: read_u32(data, 0),
        });
    }
    let expected = read_u32(data, 4) as usize;

    // Output is capped at the declared size; a frame that inflates past it fails.
    let raw = zstd::bulk::decompress(&data[FRAME_HEADER_SIZE..], expected)
        .map_err(|e| ContainerError::DecompressionFailed(e.to_string()))?;
    if raw.len() != expected {
        return Err(ContainerError::DecompressionFailed(format!(
            "size mismatch: expected {expected}, got {}",
            raw.len()
        )));
    }
    Ok(raw)
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&data[at..at + 4]);
    u32::from_le_bytes(word)
}
