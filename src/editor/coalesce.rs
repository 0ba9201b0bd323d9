//! Keystroke coalescing.
//!
//! Positions are virtual offsets: they address the document as it will be
//! once the pending edit is flushed. That keeps the merge rules local to the
//! pending edit and never requires reading the document.

use std::time::{Duration, Instant};

use crate::document::Document;

use super::apply::apply;

/// Edits further apart than this are never merged.
pub const DEFAULT_MERGE_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Bytes to insert at the edit position.
    Insert(Vec<u8>),
    /// Number of bytes to delete starting at the edit position.
    Delete(usize),
}

/// An edit that has not been folded into the piece sequence yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub timestamp: Instant,
    pub position: usize,
    pub kind: EditKind,
}

impl Edit {
    /// Insert a single byte at `position`.
    pub fn insert(position: usize, byte: u8, timestamp: Instant) -> Self {
        Self {
            timestamp,
            position,
            kind: EditKind::Insert(vec![byte]),
        }
    }

    /// Delete the byte at `position`.
    pub const fn delete(position: usize, timestamp: Instant) -> Self {
        Self {
            timestamp,
            position,
            kind: EditKind::Delete(1),
        }
    }

    /// Signed change in document length once applied.
    pub fn delta(&self) -> isize {
        let signed = |n: usize| isize::try_from(n).unwrap_or(isize::MAX);
        match &self.kind {
            EditKind::Insert(payload) => signed(payload.len()),
            EditKind::Delete(len) => -signed(*len),
        }
    }

    /// Try to absorb `next` into this edit.
    ///
    /// Inserts merge when `next` lands right after the pending run. Deletes
    /// merge when the deleted byte touches the pending span: at its start
    /// (forward delete, span grows right) or just before it (backspace, span
    /// grows left).
    fn absorb(&mut self, next: &Self, window: Duration) -> bool {
        if next.timestamp.saturating_duration_since(self.timestamp) > window {
            return false;
        }
        match (&mut self.kind, &next.kind) {
            (EditKind::Insert(payload), EditKind::Insert(more))
                if self.position + payload.len() == next.position =>
            {
                payload.extend_from_slice(more);
            }
            (EditKind::Delete(len), EditKind::Delete(more)) if next.position == self.position => {
                *len += more;
            }
            (EditKind::Delete(len), EditKind::Delete(more))
                if next.position + more == self.position =>
            {
                *len += more;
                self.position = next.position;
            }
            _ => return false,
        }
        self.timestamp = next.timestamp;
        true
    }
}

/// Holds at most one pending edit and decides when to materialize it.
#[derive(Debug, Clone)]
pub struct Coalescer {
    pending: Option<Edit>,
    window: Duration,
    materialized: usize,
}

impl Coalescer {
    pub const fn new(window: Duration) -> Self {
        Self {
            pending: None,
            window,
            materialized: 0,
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    pub const fn pending(&self) -> Option<&Edit> {
        self.pending.as_ref()
    }

    /// Number of edits applied to the document so far.
    pub const fn materialized(&self) -> usize {
        self.materialized
    }

    /// Length change the pending edit will cause when flushed.
    pub fn pending_delta(&self) -> isize {
        self.pending.as_ref().map_or(0, Edit::delta)
    }

    /// Merge `edit` into the pending edit, or flush and start over with it.
    ///
    /// Returns the edit that had to be flushed, if any.
    pub fn submit(&mut self, doc: &mut Document, edit: Edit) -> Option<Edit> {
        if let Some(pending) = self.pending.as_mut()
            && pending.absorb(&edit, self.window)
        {
            return None;
        }
        let flushed = self.flush(doc);
        self.pending = Some(edit);
        flushed
    }

    /// Apply the pending edit, if there is one, and clear it.
    ///
    /// Flushing twice applies nothing the second time.
    pub fn flush(&mut self, doc: &mut Document) -> Option<Edit> {
        let edit = self.pending.take()?;
        let _scope = crate::perf::scope("coalescer.flush");
        apply(doc, &edit);
        self.materialized += 1;
        tracing::debug!(
            position = edit.position,
            delta = edit.delta(),
            pieces = doc.pieces().len(),
            "flushed edit"
        );
        Some(edit)
    }
}

impl Default for Coalescer {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_WINDOW)
    }
}
