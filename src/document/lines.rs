//! Row queries answered from the per-piece newline caches.
//!
//! Rows are counted by summing newline counts piece by piece; only the
//! piece holding the wanted newline is looked into.

use std::ops::Range;

use super::Document;

impl Document {
    /// Number of rows with content.
    ///
    /// An empty document has no rows, and a trailing newline does not start
    /// an extra row.
    pub fn row_count(&self) -> usize {
        let newlines: usize = self.pieces.iter().map(super::Piece::newline_count).sum();
        newlines + usize::from(self.has_trailing_fragment())
    }

    /// Rows the cursor may occupy: the content rows, plus the empty row after
    /// a trailing newline. Never less than one.
    pub fn cursor_rows(&self) -> usize {
        let newlines: usize = self.pieces.iter().map(super::Piece::newline_count).sum();
        newlines + 1
    }

    /// Length of `row` in bytes, not counting its newline.
    ///
    /// Rows past the end have length zero.
    pub fn line_length(&self, row: usize) -> usize {
        self.row_range(row).map_or(0, |range| range.len())
    }

    /// Logical offset of the first byte of `row`, clamped to the document end.
    pub fn row_start(&self, row: usize) -> usize {
        if row == 0 {
            return 0;
        }
        self.nth_newline(row - 1).map_or(self.len, |nl| nl + 1)
    }

    /// Logical byte range of `row`, excluding its newline.
    pub fn row_range(&self, row: usize) -> Option<Range<usize>> {
        if row >= self.cursor_rows() {
            return None;
        }
        let start = self.row_start(row);
        let end = self.nth_newline(row).unwrap_or(self.len);
        Some(start..end)
    }

    /// The bytes of `row`, excluding its newline.
    pub fn row_bytes(&self, row: usize) -> Vec<u8> {
        self.row_range(row)
            .map(|range| self.slice(range))
            .unwrap_or_default()
    }

    /// Logical offset of (`row`, `col`), with both clamped to the document.
    pub fn offset_of(&self, row: usize, col: usize) -> usize {
        let row = row.min(self.cursor_rows() - 1);
        self.row_start(row) + col.min(self.line_length(row))
    }

    /// Row and column of a logical offset.
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let mut row = 0;
        let mut row_start = 0;
        for (logical, piece) in self.spans() {
            if logical >= offset {
                break;
            }
            for &nl in piece.newlines() {
                let at = logical + (nl - piece.start);
                if at >= offset {
                    break;
                }
                row += 1;
                row_start = at + 1;
            }
        }
        (row, offset - row_start)
    }

    /// Logical offset of the `n`th line feed (zero-based).
    fn nth_newline(&self, n: usize) -> Option<usize> {
        let mut remaining = n;
        for (logical, piece) in self.spans() {
            let count = piece.newline_count();
            if remaining < count {
                return Some(logical + (piece.newlines()[remaining] - piece.start));
            }
            remaining -= count;
        }
        None
    }

    /// Whether the document ends with bytes after its last newline.
    fn has_trailing_fragment(&self) -> bool {
        self.pieces
            .last()
            .is_some_and(|piece| piece.newlines().last() != Some(&(piece.end() - 1)))
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{Document, Piece};

    /// Build a document whose pieces are the given fragments, in order.
    fn fragmented(parts: &[&str]) -> Document {
        let joined: String = parts.concat();
        let mut doc = Document::from_bytes(joined.into_bytes());
        let whole = doc.pieces()[0].clone();
        let mut pieces: Vec<Piece> = Vec::new();
        let mut at = 0;
        for part in parts {
            pieces.push(whole.sub_piece(at..at + part.len()));
            at += part.len();
        }
        doc.splice_pieces(0..1, pieces);
        doc
    }

    #[test]
    fn test_empty_document_has_zero_rows() {
        let doc = Document::empty();
        assert_eq!(doc.row_count(), 0);
        assert_eq!(doc.cursor_rows(), 1);
        assert_eq!(doc.line_length(0), 0);
    }

    #[test]
    fn test_trailing_newline_adds_no_row() {
        let doc = Document::from_bytes(b"abc\n".to_vec());
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.cursor_rows(), 2);
        assert_eq!(doc.line_length(0), 3);
        assert_eq!(doc.line_length(1), 0);
    }

    #[test]
    fn test_row_without_trailing_newline_counts() {
        let doc = Document::from_bytes(b"a\nbc".to_vec());
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.line_length(1), 2);
    }

    #[test]
    fn test_lone_newline_is_one_empty_row() {
        let doc = Document::from_bytes(b"\n".to_vec());
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.line_length(0), 0);
    }

    #[test]
    fn test_row_spanning_three_pieces() {
        let doc = fragmented(&["ab\ncd", "ef", "gh\nij"]);
        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.line_length(0), 2);
        assert_eq!(doc.line_length(1), 6);
        assert_eq!(doc.row_bytes(1), b"cdefgh");
        assert_eq!(doc.line_length(2), 2);
    }

    #[test]
    fn test_row_start_and_offset_of() {
        let doc = fragmented(&["one\n", "two\nthree"]);
        assert_eq!(doc.row_start(1), 4);
        assert_eq!(doc.row_start(2), 8);
        assert_eq!(doc.offset_of(2, 3), 11);
        assert_eq!(doc.offset_of(1, 99), 7);
        assert_eq!(doc.offset_of(99, 0), 8);
    }

    #[test]
    fn test_position_of_inverts_offset_of() {
        let doc = fragmented(&["one\n", "two\nthree"]);
        for offset in 0..=doc.len() {
            let (row, col) = doc.position_of(offset);
            assert_eq!(doc.offset_of(row, col), offset, "offset {offset}");
        }
        assert_eq!(doc.position_of(4), (1, 0));
        assert_eq!(doc.position_of(3), (0, 3));
    }
}
