use std::ops::Range;

/// Which arena a piece points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaKind {
    /// Bytes loaded from the file. Written once, never mutated.
    Original,
    /// Bytes typed during the session. Append-only.
    Added,
}

/// Append-only byte storage.
///
/// Pieces address arena bytes by offset, so bytes are never moved,
/// overwritten, or truncated once appended.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    bytes: Vec<u8>,
}

impl Arena {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Append `bytes` and return the arena range they now occupy.
    pub fn append(&mut self, bytes: &[u8]) -> Range<usize> {
        let start = self.bytes.len();
        self.bytes.extend_from_slice(bytes);
        start..self.bytes.len()
    }

    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        &self.bytes[range]
    }

    /// Absolute offsets of every line feed in `range`.
    pub fn newlines_in(&self, range: Range<usize>) -> Vec<usize> {
        let start = range.start;
        self.bytes[range]
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .map(|(i, _)| start + i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_returns_occupied_range() {
        let mut arena = Arena::new();
        assert_eq!(arena.append(b"abc"), 0..3);
        assert_eq!(arena.append(b"de"), 3..5);
        assert_eq!(arena.slice(0..5), b"abcde");
    }

    #[test]
    fn test_newlines_are_absolute_offsets() {
        let arena = Arena::from_bytes(b"ab\ncd\n\nx".to_vec());
        assert_eq!(arena.newlines_in(0..arena.len()), vec![2, 5, 6]);
        assert_eq!(arena.newlines_in(3..6), vec![5]);
        assert!(arena.newlines_in(7..8).is_empty());
    }
}
