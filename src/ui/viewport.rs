//! Viewport and cursor management.
//!
//! The [`Viewport`] tracks the cursor in document coordinates and the
//! scroll offsets that decide which part of the document is on screen.

use crate::document::Document;
use crate::editor::Direction;

use super::render::render_column;

/// Rows at the bottom of the screen reserved for the status and message lines.
pub const STATUS_ROWS: u16 = 2;

/// Maps document positions onto the terminal grid.
///
/// The viewport tracks:
/// - Terminal dimensions (width, height)
/// - Scroll offsets (first visible row, first visible rendered column)
/// - Cursor row and byte column in the document
///
/// # Example
///
/// ```
/// use piecemeal::document::Document;
/// use piecemeal::editor::Direction;
/// use piecemeal::ui::viewport::Viewport;
///
/// let doc = Document::from_bytes(b"one\ntwo\n".to_vec());
/// let mut vp = Viewport::new(80, 24);
/// vp.move_cursor(&doc, Direction::Down);
/// vp.move_cursor(&doc, Direction::Right);
/// assert_eq!(vp.cursor(), (1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    row_offset: usize,
    col_offset: usize,
    cursor_row: usize,
    cursor_col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Viewport {
    /// Create a viewport for a terminal of `width` x `height` cells.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            row_offset: 0,
            col_offset: 0,
            cursor_row: 0,
            cursor_col: 0,
            col_memory: 0,
        }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Rows available for document text.
    pub const fn text_rows(&self) -> usize {
        self.height.saturating_sub(STATUS_ROWS) as usize
    }

    /// First visible document row.
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// First visible rendered column.
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Cursor as (row, byte column) in the document.
    pub const fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Put the cursor at a position the caller already knows is valid.
    pub const fn place_cursor(&mut self, row: usize, col: usize) {
        self.cursor_row = row;
        self.cursor_col = col;
        self.col_memory = col;
    }

    /// Move the cursor one step, staying inside the document.
    pub fn move_cursor(&mut self, doc: &Document, direction: Direction) {
        let row_len = doc.line_length(self.cursor_row);
        match direction {
            Direction::Left => {
                if self.cursor_col > 0 {
                    self.place_cursor(self.cursor_row, self.cursor_col - 1);
                } else if self.cursor_row > 0 {
                    let prev = self.cursor_row - 1;
                    self.place_cursor(prev, doc.line_length(prev));
                }
            }
            Direction::Right => {
                if self.cursor_col < row_len {
                    self.place_cursor(self.cursor_row, self.cursor_col + 1);
                } else if self.cursor_row + 1 < doc.cursor_rows() {
                    self.place_cursor(self.cursor_row + 1, 0);
                }
            }
            Direction::Up => {
                if self.cursor_row > 0 {
                    self.move_vertically(doc, self.cursor_row - 1);
                }
            }
            Direction::Down => {
                if self.cursor_row + 1 < doc.cursor_rows() {
                    self.move_vertically(doc, self.cursor_row + 1);
                }
            }
        }
    }

    /// Move cursor to the beginning of the row (Home).
    pub const fn move_home(&mut self) {
        self.place_cursor(self.cursor_row, 0);
    }

    /// Move cursor to the end of the row (End).
    pub fn move_end(&mut self, doc: &Document) {
        self.place_cursor(self.cursor_row, doc.line_length(self.cursor_row));
    }

    /// Move the cursor up one screen of text.
    pub fn page_up(&mut self, doc: &Document) {
        let target = self.cursor_row.saturating_sub(self.text_rows().max(1));
        self.move_vertically(doc, target);
    }

    /// Move the cursor down one screen of text.
    pub fn page_down(&mut self, doc: &Document) {
        let last = doc.cursor_rows() - 1;
        let target = (self.cursor_row + self.text_rows().max(1)).min(last);
        self.move_vertically(doc, target);
    }

    /// Pull the cursor back inside the document after it shrank.
    pub fn clamp_to(&mut self, doc: &Document) {
        let row = self.cursor_row.min(doc.cursor_rows() - 1);
        let col = self.cursor_col.min(doc.line_length(row));
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Adjust scroll offsets so the cursor is on screen.
    ///
    /// Offsets only move when the cursor would leave the text area.
    pub fn scroll(&mut self, doc: &Document) {
        let rows = self.text_rows().max(1);
        if self.cursor_row < self.row_offset {
            self.row_offset = self.cursor_row;
        } else if self.cursor_row >= self.row_offset + rows {
            self.row_offset = self.cursor_row + 1 - rows;
        }

        let cols = usize::from(self.width).max(1);
        let rx = self.render_col(doc);
        if rx < self.col_offset {
            self.col_offset = rx;
        } else if rx >= self.col_offset + cols {
            self.col_offset = rx + 1 - cols;
        }
    }

    /// Cursor position on screen as (column, row), after [`Viewport::scroll`].
    pub fn screen_cursor(&self, doc: &Document) -> (u16, u16) {
        let x = self.render_col(doc).saturating_sub(self.col_offset);
        let y = self.cursor_row.saturating_sub(self.row_offset);
        (
            u16::try_from(x).unwrap_or(u16::MAX),
            u16::try_from(y).unwrap_or(u16::MAX),
        )
    }

    /// Resize the viewport.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    fn move_vertically(&mut self, doc: &Document, row: usize) {
        self.cursor_row = row;
        self.cursor_col = self.col_memory.min(doc.line_length(row));
    }

    fn render_col(&self, doc: &Document) -> usize {
        render_column(&doc.row_bytes(self.cursor_row), self.cursor_col)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
