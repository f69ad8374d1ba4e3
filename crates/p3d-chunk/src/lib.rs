//! Chunk model for Pure3D (P3D) containers.
//!
//! A P3D file is a tree of chunks. Every chunk carries a `u32` type tag, an
//! opaque payload and an ordered list of children. This crate models that
//! tree without interpreting payloads, with two exceptions:
//!
//! - [`Chunk::display_name`] reads the name field of well-known named kinds.
//! - [`history_chunk`] / [`history_lines`] build and read the text
//!   annotation chunk kind ([`ChunkTag::HISTORY`]).
//!
//! Reading and writing whole files lives in `p3d-container`.

pub mod chunk;
pub mod error;
pub mod history;
pub mod string;
pub mod tag;

pub use chunk::{Chunk, CHUNK_HEADER_SIZE};
pub use error::{ChunkError, ChunkResult};
pub use history::{history_chunk, history_lines};
pub use string::{read_string, write_string, MAX_STRING_LEN};
pub use tag::{ChunkTag, NameLayout};
