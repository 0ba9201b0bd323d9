//! Editing session state.
//!
//! While an edit is pending the document lags behind what the user sees.
//! Keystrokes that can merge only touch the cached virtual cursor offset;
//! anything that needs row geometry flushes first.

use std::io::Write;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::ui::render::{DisplayRow, render};
use crate::ui::viewport::Viewport;

use super::Direction;
use super::coalesce::{Coalescer, Edit};

/// One open document with its cursor, viewport and pending edit.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Document,
    coalescer: Coalescer,
    viewport: Viewport,
    /// Cursor position in the document as it will be after the flush.
    cursor_offset: usize,
    dirty: bool,
}

impl Session {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// Use a different keystroke merge window.
    #[must_use]
    pub fn with_merge_window(mut self, window: Duration) -> Self {
        self.coalescer = Coalescer::new(window);
        self
    }

    /// Document as of the last flush.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Edit waiting to be applied, if any.
    pub const fn pending(&self) -> Option<&Edit> {
        self.coalescer.pending()
    }

    /// Number of edits applied to the document so far.
    pub const fn materialized_edits(&self) -> usize {
        self.coalescer.materialized()
    }

    pub const fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Insert one byte at the cursor and step past it.
    pub fn insert_byte(&mut self, byte: u8, now: Instant) {
        self.submit(Edit::insert(self.cursor_offset, byte, now));
        self.cursor_offset += 1;
        let (row, col) = self.viewport.cursor();
        if byte == b'\n' {
            self.viewport.place_cursor(row + 1, 0);
        } else {
            self.viewport.place_cursor(row, col + 1);
        }
    }

    pub fn insert_newline(&mut self, now: Instant) {
        self.insert_byte(b'\n', now);
    }

    /// Delete the byte before the cursor. At the start of a row this joins
    /// it onto the previous one.
    pub fn delete_back(&mut self, now: Instant) {
        if self.cursor_offset == 0 {
            return;
        }
        self.cursor_offset -= 1;
        self.submit(Edit::delete(self.cursor_offset, now));
        let (row, col) = self.viewport.cursor();
        if col > 0 {
            self.viewport.place_cursor(row, col - 1);
        } else {
            self.flush();
            let (row, col) = self.document.position_of(self.cursor_offset);
            self.viewport.place_cursor(row, col);
        }
    }

    /// Delete the byte under the cursor. Nothing happens at the end of the
    /// document.
    pub fn delete_forward(&mut self, now: Instant) {
        if self.cursor_offset >= self.virtual_len() {
            return;
        }
        self.submit(Edit::delete(self.cursor_offset, now));
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.flush();
        self.viewport.move_cursor(&self.document, direction);
        self.sync_offset();
    }

    pub fn move_home(&mut self) {
        self.flush();
        self.viewport.move_home();
        self.sync_offset();
    }

    pub fn move_end(&mut self) {
        self.flush();
        self.viewport.move_end(&self.document);
        self.sync_offset();
    }

    pub fn page_up(&mut self) {
        self.flush();
        self.viewport.page_up(&self.document);
        self.sync_offset();
    }

    pub fn page_down(&mut self) {
        self.flush();
        self.viewport.page_down(&self.document);
        self.sync_offset();
    }

    /// Apply the pending edit, if any. Safe to call repeatedly.
    pub fn flush(&mut self) {
        self.coalescer.flush(&mut self.document);
    }

    /// Flush, scroll the cursor into view and render the text area.
    pub fn render(&mut self) -> Vec<DisplayRow> {
        self.flush();
        self.viewport.scroll(&self.document);
        render(&self.document, &self.viewport)
    }

    /// Cursor on screen as (column, row). Valid after [`Session::render`].
    pub fn screen_cursor(&self) -> (u16, u16) {
        self.viewport.screen_cursor(&self.document)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
    }

    /// Flush and write the whole document, then mark the session clean.
    /// Returns the number of bytes written.
    pub fn save_to<W: Write>(&mut self, writer: &mut W) -> std::io::Result<usize> {
        self.flush();
        let written = self.document.write_to(writer)?;
        writer.flush()?;
        self.mark_clean();
        Ok(written)
    }

    fn submit(&mut self, edit: Edit) {
        self.coalescer.submit(&mut self.document, edit);
        self.dirty = true;
    }

    fn virtual_len(&self) -> usize {
        self.document
            .len()
            .saturating_add_signed(self.coalescer.pending_delta())
    }

    fn sync_offset(&mut self) {
        let (row, col) = self.viewport.cursor();
        self.cursor_offset = self.document.offset_of(row, col);
    }
}
