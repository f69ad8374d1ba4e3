//! Chunk ordering.
//!
//! Chunks are grouped by type tag, groups in ascending tag order. With
//! `alphabetical` set, named chunks inside a group are ordered by display
//! name (ordinal, case-sensitive) and unnamed chunks follow them. The sort
//! is stable: chunks with equal keys keep their input order.

use p3d_chunk::{history_chunk, Chunk, ChunkResult, ChunkTag};
use tracing::debug;

/// Sorting sub-options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortOptions {
    /// Order chunks by display name inside each tag group.
    pub alphabetical: bool,
    /// Insert a section header chunk before each tag group.
    pub include_section_headers: bool,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct SortKey {
    tag: ChunkTag,
    name: NameKey,
}

// Variant order puts named chunks ahead of unnamed ones.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NameKey {
    Named(String),
    Unnamed,
}

impl SortKey {
    fn of(chunk: &Chunk, alphabetical: bool) -> Self {
        let name = match alphabetical.then(|| chunk.display_name()).flatten() {
            Some(name) => NameKey::Named(name),
            None => NameKey::Unnamed,
        };
        Self {
            tag: chunk.tag(),
            name,
        }
    }
}

/// Sort `chunks` into a new total order.
///
/// Never drops, merges or duplicates a chunk. Section headers, when
/// requested, are the only chunks added.
pub fn sort_chunks(chunks: Vec<Chunk>, options: SortOptions) -> ChunkResult<Vec<Chunk>> {
    let mut keyed: Vec<(SortKey, Chunk)> = chunks
        .into_iter()
        .map(|chunk| (SortKey::of(&chunk, options.alphabetical), chunk))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    if !options.include_section_headers {
        return Ok(keyed.into_iter().map(|(_, chunk)| chunk).collect());
    }

    let mut sorted = Vec::with_capacity(keyed.len() + 8);
    let mut group: Option<ChunkTag> = None;
    for (key, chunk) in keyed {
        if group != Some(key.tag) {
            debug!(group = %key.tag, "section header inserted");
            sorted.push(section_header(key.tag)?);
            group = Some(key.tag);
        }
        sorted.push(chunk);
    }
    Ok(sorted)
}

/// A history chunk with a single line naming the `tag` group.
pub fn section_header(tag: ChunkTag) -> ChunkResult<Chunk> {
    history_chunk(&[tag.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use p3d_chunk::{history_lines, write_string};

    fn named(tag: ChunkTag, name: &str) -> Chunk {
        let mut payload = Vec::new();
        write_string(&mut payload, name).unwrap();
        Chunk::new(tag, payload)
    }

    fn names(chunks: &[Chunk]) -> Vec<String> {
        chunks
            .iter()
            .map(|c| match c.display_name() {
                Some(name) => format!("{}:{name}", c.tag().name().unwrap_or("?")),
                None => c.tag().to_string(),
            })
            .collect()
    }

    #[test]
    fn groups_by_tag_ascending() {
        let input = vec![
            named(ChunkTag::TEXTURE, "b"),
            named(ChunkTag::MESH, "m"),
            named(ChunkTag::TEXTURE, "a"),
        ];
        let sorted = sort_chunks(input, SortOptions::default()).unwrap();
        assert_eq!(names(&sorted), vec!["Mesh:m", "Texture:b", "Texture:a"]);
    }

    #[test]
    fn alphabetical_within_group() {
        let input = vec![
            named(ChunkTag::TEXTURE, "b"),
            named(ChunkTag::MESH, "m"),
            named(ChunkTag::TEXTURE, "a"),
            named(ChunkTag::TEXTURE, "B"),
        ];
        let options = SortOptions {
            alphabetical: true,
            ..Default::default()
        };
        let sorted = sort_chunks(input, options).unwrap();
        // Ordinal comparison: uppercase sorts before lowercase.
        assert_eq!(names(&sorted), vec!["Mesh:m", "Texture:B", "Texture:a", "Texture:b"]);
    }

    #[test]
    fn unnamed_follow_named_and_keep_order() {
        let input = vec![
            Chunk::new(ChunkTag::TEXTURE, vec![1]),
            named(ChunkTag::TEXTURE, "z"),
            Chunk::new(ChunkTag::TEXTURE, vec![]),
            named(ChunkTag::TEXTURE, "a"),
        ];
        let options = SortOptions {
            alphabetical: true,
            ..Default::default()
        };
        let sorted = sort_chunks(input, options).unwrap();
        assert_eq!(sorted[0].display_name().as_deref(), Some("a"));
        assert_eq!(sorted[1].display_name().as_deref(), Some("z"));
        // [1] is a truncated name field; [] has none. Input order is kept.
        assert_eq!(sorted[2].payload(), &[1]);
        assert!(sorted[3].payload().is_empty());
    }

    #[test]
    fn equal_names_keep_input_order() {
        let mut first = named(ChunkTag::MESH, "dup");
        first.push_child(Chunk::new(0x1u32, vec![1]));
        let mut second = named(ChunkTag::MESH, "dup");
        second.push_child(Chunk::new(0x1u32, vec![2]));
        let options = SortOptions {
            alphabetical: true,
            ..Default::default()
        };
        let sorted = sort_chunks(vec![first, second], options).unwrap();
        assert_eq!(sorted[0].children()[0].payload(), &[1]);
        assert_eq!(sorted[1].children()[0].payload(), &[2]);
    }

    #[test]
    fn section_headers_mark_each_group() {
        let input = vec![
            named(ChunkTag::TEXTURE, "t1"),
            Chunk::new(0x0000_ABCDu32, vec![]),
            named(ChunkTag::TEXTURE, "t2"),
        ];
        let options = SortOptions {
            include_section_headers: true,
            ..Default::default()
        };
        let sorted = sort_chunks(input, options).unwrap();
        assert_eq!(sorted.len(), 5);
        assert!(sorted[0].tag().is_history());
        assert_eq!(history_lines(&sorted[0]).unwrap(), vec!["0x0000ABCD"]);
        assert_eq!(sorted[1].tag().id(), 0xABCD);
        assert_eq!(history_lines(&sorted[2]).unwrap(), vec!["Texture (0x00019000)"]);
        assert_eq!(sorted[3].display_name().as_deref(), Some("t1"));
        assert_eq!(sorted[4].display_name().as_deref(), Some("t2"));
    }

    #[test]
    fn empty_input() {
        let options = SortOptions {
            alphabetical: true,
            include_section_headers: true,
        };
        assert!(sort_chunks(Vec::new(), options).unwrap().is_empty());
    }
}
