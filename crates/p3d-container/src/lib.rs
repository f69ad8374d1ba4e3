//! Pure3D container codec.
//!
//! Reads and writes whole P3D files as [`Container`]s of
//! [`p3d_chunk::Chunk`] trees.
//!
//! # Format
//!
//! - **Plain** (`0xFF443350`): 12-byte file header (magic, header size,
//!   total size) followed by the top-level chunks. Each chunk is a 12-byte
//!   header (tag, data size, total size), its payload, then its children.
//!   All integers are little-endian.
//! - **Compressed** (`P3DZ`): magic, uncompressed size, then one zstd frame
//!   of the plain bytes. Detected automatically on load.
//!
//! # I/O
//!
//! All access goes through the [`ContainerIo`] trait:
//!
//! - [`FileContainerIo`] -- filesystem, atomic writes via temp file + rename
//! - [`MemoryContainerIo`] -- `HashMap`-based, for tests and embedding

pub mod compress;
pub mod container;
pub mod error;
pub mod io;
pub mod memory;
pub mod reader;
pub mod writer;

pub use compress::{compress, decompress, is_compressed, P3DZ_MAGIC};
pub use container::Container;
pub use error::{ContainerError, ContainerResult};
pub use io::{ContainerIo, FileContainerIo};
pub use memory::MemoryContainerIo;
pub use reader::{decode_container, parse_container, MAX_DEPTH, P3D_MAGIC};
pub use writer::{encode_container, serialize_container, write_atomic};

#[cfg(test)]
mod tests {
    use super::*;
    use p3d_chunk::{history_chunk, history_lines, Chunk, ChunkTag};

    fn sample() -> Container {
        let texture = Chunk::with_children(
            ChunkTag::TEXTURE,
            vec![5, b'r', b'o', b'a', b'd', 0],
            vec![Chunk::with_children(
                ChunkTag::IMAGE,
                vec![3, b'i', b'm', b'g'],
                vec![Chunk::new(0x0001_9002u32, vec![0xAA; 64])],
            )],
        );
        let mesh = Chunk::new(ChunkTag::MESH, vec![4, b'c', b'a', b'r', b'1']);
        Container::from_chunks(vec![history_chunk(&["made by hand"]).unwrap(), texture, mesh])
    }

    #[test]
    fn plain_roundtrip() {
        let original = sample();
        let bytes = encode_container(&original, false).unwrap();
        assert_eq!(bytes.len() as u64, original.total_size());

        let decoded = decode_container(&bytes).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(history_lines(&decoded.chunks()[0]).unwrap(), vec!["made by hand"]);
        assert_eq!(decoded.chunks()[1].display_name().as_deref(), Some("road"));
        assert_eq!(decoded.chunks()[1].node_count(), 3);
        assert_eq!(serialize_container(&decoded).unwrap(), bytes);
    }

    #[test]
    fn compressed_roundtrip() {
        let original = sample();
        let plain = encode_container(&original, false).unwrap();
        let packed = encode_container(&original, true).unwrap();
        assert!(is_compressed(&packed));

        let decoded = decode_container(&packed).unwrap();
        assert_eq!(serialize_container(&decoded).unwrap(), plain);
    }

    #[test]
    fn disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.p3d");
        let io = FileContainerIo;

        assert!(!io.exists(&path));
        io.write(&sample(), &path, false).unwrap();
        assert!(io.exists(&path));

        let loaded = io.load(&path).unwrap();
        assert_eq!(loaded.source(), Some(path.as_path()));
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.chunks()[2].display_name().as_deref(), Some("car1"));
    }

    #[test]
    fn disk_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.p3d");
        std::fs::write(&path, [0x50, 0x33, 0x44, 0xFF, 12, 0, 0, 0, 99, 0, 0, 0]).unwrap();
        let err = FileContainerIo.load(&path).unwrap_err();
        assert!(matches!(err, ContainerError::Truncated { .. }));
    }
}
