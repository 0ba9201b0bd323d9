use std::ops::Range;

use super::arena::ArenaKind;

/// A contiguous byte range inside one arena.
///
/// `newlines` caches the absolute arena offsets of every line feed in
/// `start..start + length`, strictly ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub arena: ArenaKind,
    pub start: usize,
    pub length: usize,
    newlines: Vec<usize>,
}

impl Piece {
    pub fn new(arena: ArenaKind, range: Range<usize>, newlines: Vec<usize>) -> Self {
        let piece = Self {
            arena,
            start: range.start,
            length: range.end - range.start,
            newlines,
        };
        debug_assert!(piece.newlines_in_range(), "newline cache outside piece: {piece:?}");
        piece
    }

    pub fn original(range: Range<usize>, newlines: Vec<usize>) -> Self {
        Self::new(ArenaKind::Original, range, newlines)
    }

    pub fn added(range: Range<usize>, newlines: Vec<usize>) -> Self {
        Self::new(ArenaKind::Added, range, newlines)
    }

    /// One past the last arena offset covered by this piece.
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn newlines(&self) -> &[usize] {
        &self.newlines
    }

    pub fn newline_count(&self) -> usize {
        self.newlines.len()
    }

    /// Grow the piece to the right over freshly appended arena bytes.
    pub fn extend(&mut self, by: usize, newlines: &[usize]) {
        self.length += by;
        self.newlines.extend_from_slice(newlines);
        debug_assert!(self.newlines_in_range());
    }

    /// Split at an absolute arena offset strictly inside the piece.
    ///
    /// Each half keeps the cached newlines that fall in its own range.
    pub fn split_at(&self, arena_offset: usize) -> (Self, Self) {
        debug_assert!(self.start < arena_offset && arena_offset < self.end());
        let pivot = self.newlines.partition_point(|&nl| nl < arena_offset);
        let left = Self::new(
            self.arena,
            self.start..arena_offset,
            self.newlines[..pivot].to_vec(),
        );
        let right = Self::new(
            self.arena,
            arena_offset..self.end(),
            self.newlines[pivot..].to_vec(),
        );
        (left, right)
    }

    /// The sub-piece covering `range`, which must lie inside this piece.
    pub fn sub_piece(&self, range: Range<usize>) -> Self {
        debug_assert!(self.start <= range.start && range.end <= self.end());
        let from = self.newlines.partition_point(|&nl| nl < range.start);
        let to = self.newlines.partition_point(|&nl| nl < range.end);
        Self::new(self.arena, range, self.newlines[from..to].to_vec())
    }

    fn newlines_in_range(&self) -> bool {
        self.newlines.windows(2).all(|w| w[0] < w[1])
            && self
                .newlines
                .iter()
                .all(|&nl| nl >= self.start && nl < self.end())
    }
}
