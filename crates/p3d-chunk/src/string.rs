//! Length-prefixed strings as stored in chunk payloads.
//!
//! A string is a single length byte followed by that many bytes. Writers
//! sometimes pad the bytes with NULs; readers trim them.

use crate::error::{ChunkError, ChunkResult};

/// Longest string a one-byte length prefix can describe.
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Append `value` to `buf` as a length-prefixed string.
pub fn write_string(buf: &mut Vec<u8>, value: &str) -> ChunkResult<()> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_STRING_LEN {
        return Err(ChunkError::StringTooLong { len: bytes.len() });
    }
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Read a length-prefixed string from the start of `data`.
///
/// Returns the decoded string and the number of bytes consumed. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn read_string(data: &[u8]) -> ChunkResult<(String, usize)> {
    let (&len, rest) = data
        .split_first()
        .ok_or_else(|| ChunkError::truncated("string length"))?;
    let len = len as usize;
    let raw = rest
        .get(..len)
        .ok_or_else(|| ChunkError::truncated("string bytes"))?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    Ok((String::from_utf8_lossy(&raw[..end]).into_owned(), 1 + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let mut buf = Vec::new();
        write_string(&mut buf, "skybox_m").unwrap();
        assert_eq!(buf[0], 8);
        let (s, consumed) = read_string(&buf).unwrap();
        assert_eq!(s, "skybox_m");
        assert_eq!(consumed, 9);
    }

    #[test]
    fn nul_padding_trimmed() {
        let data = [4, b'a', b'b', 0, 0, 0xFF];
        let (s, consumed) = read_string(&data).unwrap();
        assert_eq!(s, "ab");
        assert_eq!(consumed, 5);
    }

    #[test]
    fn too_long_rejected() {
        let mut buf = Vec::new();
        let err = write_string(&mut buf, &"x".repeat(256)).unwrap_err();
        assert_eq!(err, ChunkError::StringTooLong { len: 256 });
        assert!(buf.is_empty());
    }

    #[test]
    fn exactly_max_accepted() {
        let mut buf = Vec::new();
        write_string(&mut buf, &"x".repeat(MAX_STRING_LEN)).unwrap();
        assert_eq!(buf.len(), 256);
    }

    #[test]
    fn truncated_input() {
        assert!(matches!(read_string(&[]), Err(ChunkError::Truncated { .. })));
        assert!(matches!(read_string(&[3, b'a']), Err(ChunkError::Truncated { .. })));
    }
}
