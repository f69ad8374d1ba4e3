//! Deep structural chunk equality, the relation behind deduplication.
//!
//! Two chunks are equal when their tags, payload bytes and child counts
//! match and every child pair, in order, is equal. The same rule applies to
//! leaf and container chunk kinds.

use p3d_chunk::Chunk;

/// Returns `true` if `a` and `b` are byte-for-byte duplicate trees.
pub fn chunks_equal(a: &Chunk, b: &Chunk) -> bool {
    // Cheap header comparisons first, then bytes, then recursion.
    a.tag() == b.tag()
        && a.payload().len() == b.payload().len()
        && a.children().len() == b.children().len()
        && a.payload() == b.payload()
        && a
            .children()
            .iter()
            .zip(b.children())
            .all(|(x, y)| chunks_equal(x, y))
}

/// Returns `true` if any chunk in `haystack` equals `needle`.
pub fn contains_equal(haystack: &[Chunk], needle: &Chunk) -> bool {
    haystack.iter().any(|chunk| chunks_equal(chunk, needle))
}
