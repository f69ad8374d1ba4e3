use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::container::Container;
use crate::error::{ContainerError, ContainerResult};
use crate::io::ContainerIo;
use crate::reader::decode_container;
use crate::writer::encode_container;

/// In-memory container I/O keyed by path.
///
/// Files are held as encoded bytes, so loads and writes go through the same
/// codec as [`FileContainerIo`](crate::FileContainerIo). Intended for tests
/// and embedding.
pub struct MemoryContainerIo {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryContainerIo {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Store raw file bytes at `path`.
    pub fn insert_bytes(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.write().expect("lock poisoned").insert(path.into(), bytes);
    }

    /// Encode and store `container` at `path`.
    pub fn insert(&self, path: impl Into<PathBuf>, container: &Container) -> ContainerResult<()> {
        let bytes = encode_container(container, false)?;
        self.insert_bytes(path, bytes);
        Ok(())
    }

    /// Raw bytes stored at `path`.
    pub fn bytes(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().expect("lock poisoned").get(path).cloned()
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }
}

impl Default for MemoryContainerIo {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerIo for MemoryContainerIo {
    fn load(&self, path: &Path) -> ContainerResult<Container> {
        let files = self.files.read().expect("lock poisoned");
        let data = files.get(path).ok_or_else(|| {
            ContainerError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })?;
        Ok(decode_container(data)?.with_source(path))
    }

    fn write(&self, container: &Container, path: &Path, compressed: bool) -> ContainerResult<()> {
        let bytes = encode_container(container, compressed)?;
        self.insert_bytes(path, bytes);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().expect("lock poisoned").contains_key(path)
    }
}

impl std::fmt::Debug for MemoryContainerIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryContainerIo")
            .field("file_count", &self.len())
            .finish()
    }
}
