//! Projects the document onto the screen grid.
//!
//! Pieces are walked in order. Pieces that lie wholly above the first
//! visible row are skipped on their newline counts alone; visible rows are
//! assembled from piece fragments, tab-expanded, and cut to the horizontal
//! window.

use crate::document::Document;

use super::viewport::Viewport;

/// Columns a tab byte expands to.
pub const TAB_WIDTH: usize = 4;

/// Glyph drawn on screen rows past the end of the document.
pub const FILLER: u8 = b'~';

/// One screen row of the text area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    /// Visible slice of a document row, tabs already expanded.
    Text(Vec<u8>),
    /// A row below the end of the document.
    Filler,
}

impl DisplayRow {
    /// Bytes to put on screen for this row.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(bytes) => bytes,
            Self::Filler => std::slice::from_ref(&FILLER),
        }
    }
}

/// Render exactly `viewport.text_rows()` rows. Never mutates the document.
pub fn render(doc: &Document, viewport: &Viewport) -> Vec<DisplayRow> {
    let _scope = crate::perf::scope("ui.render");
    let limit = viewport.text_rows();
    let first = viewport.row_offset();
    let mut rows = Vec::with_capacity(limit);

    if doc.is_empty() {
        if first == 0 && limit > 0 {
            rows.push(DisplayRow::Text(Vec::new()));
        }
    } else {
        // Row the next byte belongs to, and the part of it collected so far.
        let mut row = 0;
        let mut pending: Vec<u8> = Vec::new();

        'pieces: for piece in doc.pieces() {
            if rows.len() >= limit {
                break;
            }
            if row + piece.newline_count() < first {
                row += piece.newline_count();
                continue;
            }
            let bytes = doc.piece_bytes(piece);
            let mut from = 0;
            for &nl in piece.newlines() {
                let to = nl - piece.start;
                if row >= first {
                    pending.extend_from_slice(&bytes[from..to]);
                    rows.push(visible(&pending, viewport));
                    pending.clear();
                    if rows.len() >= limit {
                        break 'pieces;
                    }
                }
                row += 1;
                from = to + 1;
            }
            if row >= first {
                pending.extend_from_slice(&bytes[from..]);
            }
        }

        if !pending.is_empty() && rows.len() < limit {
            rows.push(visible(&pending, viewport));
        }
    }

    rows.resize(limit, DisplayRow::Filler);
    rows
}

/// Screen column of byte column `col` in `row`, counting tab expansion.
pub fn render_column(row: &[u8], col: usize) -> usize {
    row.iter()
        .take(col)
        .map(|&b| if b == b'\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Replace every tab with a run of spaces.
pub fn expand_tabs(row: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(row.len());
    for &b in row {
        if b == b'\t' {
            out.extend_from_slice(&[b' '; TAB_WIDTH]);
        } else {
            out.push(b);
        }
    }
    out
}

fn visible(row: &[u8], viewport: &Viewport) -> DisplayRow {
    let expanded = expand_tabs(row);
    let start = viewport.col_offset().min(expanded.len());
    let end = (start + usize::from(viewport.width())).min(expanded.len());
    DisplayRow::Text(expanded[start..end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Piece;

    fn text_rows(rows: &[DisplayRow]) -> Vec<String> {
        rows.iter()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned())
            .collect()
    }

    #[test]
    fn test_one_line_document_is_padded_with_filler() {
        let doc = Document::from_bytes(b"hello".to_vec());
        let rows = render(&doc, &Viewport::new(80, 10));
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], DisplayRow::Text(b"hello".to_vec()));
        assert!(rows[1..].iter().all(|r| *r == DisplayRow::Filler));
    }

    #[test]
    fn test_empty_document_shows_one_blank_row() {
        let rows = render(&Document::empty(), &Viewport::new(80, 5));
        assert_eq!(text_rows(&rows), vec!["", "~", "~"]);
    }

    #[test]
    fn test_trailing_newline_does_not_render_extra_row() {
        let doc = Document::from_bytes(b"a\nb\n".to_vec());
        let rows = render(&doc, &Viewport::new(80, 6));
        assert_eq!(text_rows(&rows), vec!["a", "b", "~", "~"]);
    }

    #[test]
    fn test_tabs_expand_to_four_spaces() {
        let doc = Document::from_bytes(b"\tx\ty".to_vec());
        let rows = render(&doc, &Viewport::new(80, 3));
        assert_eq!(rows[0], DisplayRow::Text(b"    x    y".to_vec()));
    }

    #[test]
    fn test_rows_are_cut_to_width_and_col_offset() {
        let doc = Document::from_bytes(b"0123456789\nab".to_vec());
        let mut vp = Viewport::new(4, 4);
        vp.place_cursor(0, 7);
        vp.scroll(&doc);
        assert_eq!(vp.col_offset(), 4);
        let rows = render(&doc, &vp);
        assert_eq!(text_rows(&rows), vec!["4567", ""]);
    }

    #[test]
    fn test_vertical_offset_skips_rows() {
        let text: String = (0..20).map(|i| format!("row{i}\n")).collect();
        let doc = Document::from_bytes(text.into_bytes());
        let mut vp = Viewport::new(80, 5);
        vp.place_cursor(10, 0);
        vp.scroll(&doc);
        let rows = render(&doc, &vp);
        assert_eq!(text_rows(&rows), vec!["row8", "row9", "row10"]);
    }

    #[test]
    fn test_rows_spanning_piece_boundaries() {
        let mut doc = Document::from_bytes(b"ab\ncdef\ngh".to_vec());
        let whole = doc.pieces()[0].clone();
        let parts: Vec<Piece> = [0..1, 1..4, 4..6, 6..10]
            .into_iter()
            .map(|r| whole.sub_piece(r))
            .collect();
        doc.splice_pieces(0..1, parts);

        let rows = render(&doc, &Viewport::new(80, 5));
        assert_eq!(text_rows(&rows), vec!["ab", "cdef", "gh"]);

        let mut vp = Viewport::new(80, 3);
        vp.place_cursor(2, 0);
        vp.scroll(&doc);
        assert_eq!(text_rows(&render(&doc, &vp)), vec!["gh"]);
    }

    #[test]
    fn test_render_column_counts_tabs() {
        assert_eq!(render_column(b"a\tb", 0), 0);
        assert_eq!(render_column(b"a\tb", 2), 5);
        assert_eq!(render_column(b"a\tb", 9), 6);
    }

    #[test]
    fn test_zero_height_screen_renders_nothing() {
        let doc = Document::from_bytes(b"x".to_vec());
        assert!(render(&doc, &Viewport::new(80, 1)).is_empty());
    }
}
