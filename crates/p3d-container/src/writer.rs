use std::io::Write;
use std::path::Path;

use p3d_chunk::Chunk;

use crate::compress::compress;
use crate::container::Container;
use crate::error::{ContainerError, ContainerResult};
use crate::reader::{FILE_HEADER_SIZE, P3D_MAGIC};

/// Encode a container to file bytes, optionally compressed.
pub fn encode_container(container: &Container, compressed: bool) -> ContainerResult<Vec<u8>> {
    let raw = serialize_container(container)?;
    if compressed {
        compress(&raw)
    } else {
        Ok(raw)
    }
}

/// Serialize a container to plain, uncompressed bytes.
pub fn serialize_container(container: &Container) -> ContainerResult<Vec<u8>> {
    let total = checked_size("container", container.total_size())?;
    let mut buf = Vec::with_capacity(total as usize);

    // Header: magic + header size + total size
    buf.extend_from_slice(&P3D_MAGIC.to_le_bytes());
    buf.extend_from_slice(&(FILE_HEADER_SIZE as u32).to_le_bytes());
    buf.extend_from_slice(&total.to_le_bytes());

    for chunk in container.chunks() {
        write_chunk(&mut buf, chunk)?;
    }
    Ok(buf)
}

fn write_chunk(buf: &mut Vec<u8>, chunk: &Chunk) -> ContainerResult<()> {
    let data_size = checked_size("chunk data", chunk.data_size())?;
    let total_size = checked_size("chunk", chunk.total_size())?;

    buf.extend_from_slice(&chunk.tag().id().to_le_bytes());
    buf.extend_from_slice(&data_size.to_le_bytes());
    buf.extend_from_slice(&total_size.to_le_bytes());
    buf.extend_from_slice(chunk.payload());
    for child in chunk.children() {
        write_chunk(buf, child)?;
    }
    Ok(())
}

fn checked_size(what: &str, size: u64) -> ContainerResult<u32> {
    u32::try_from(size).map_err(|_| ContainerError::TooLarge {
        what: what.into(),
        size,
    })
}

/// Write `bytes` to `path` atomically.
///
/// The bytes go to a temporary file in the destination directory, which is
/// synced and then renamed over `path`. On error the temporary file is
/// removed and `path` is left untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ContainerResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ContainerError::Io(e.error))?;
    Ok(())
}
