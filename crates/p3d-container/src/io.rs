use std::path::Path;

use tracing::debug;

use crate::container::Container;
use crate::error::ContainerResult;
use crate::reader::decode_container;
use crate::writer::{encode_container, write_atomic};

/// Loads and stores whole containers.
///
/// Implementations must satisfy these rules:
/// - `load` returns the full chunk tree or an error; never a partial tree.
/// - `write` either replaces the destination completely or leaves it
///   untouched.
/// - Compressed and plain inputs are both accepted by `load`.
pub trait ContainerIo: Send + Sync {
    /// Load the container stored at `path`.
    fn load(&self, path: &Path) -> ContainerResult<Container>;

    /// Store `container` at `path`, compressed or plain.
    fn write(&self, container: &Container, path: &Path, compressed: bool) -> ContainerResult<()>;

    /// Check whether something already exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// Filesystem-backed container I/O.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileContainerIo;

impl ContainerIo for FileContainerIo {
    fn load(&self, path: &Path) -> ContainerResult<Container> {
        let data = std::fs::read(path)?;
        let container = decode_container(&data)?.with_source(path);
        debug!(path = %path.display(), bytes = data.len(), chunks = container.len(), "container loaded");
        Ok(container)
    }

    fn write(&self, container: &Container, path: &Path, compressed: bool) -> ContainerResult<()> {
        let bytes = encode_container(container, compressed)?;
        write_atomic(path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), compressed, "container written");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
