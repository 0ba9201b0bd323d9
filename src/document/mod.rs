//! Piece-table document model.
//!
//! This module handles:
//! - The two append-only arenas (loaded file bytes, typed bytes)
//! - The ordered piece sequence whose concatenation is the document
//! - Line queries answered from per-piece newline caches
//!
//! Mutation goes through [`crate::editor`]; everything here is either a
//! read query or a low-level splice used by the edit applier.

mod arena;
mod lines;
mod piece;

use std::io::Write;
use std::ops::Range;
use std::path::Path;

pub use arena::{Arena, ArenaKind};
pub use piece::Piece;

use crate::error::{EditorError, Result};

/// Files at or above this size are refused at load time.
pub const MAX_FILE_BYTES: u64 = 1 << 30;

/// Where a logical position lands in the piece sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Index of the piece holding the position.
    pub piece: usize,
    /// Absolute offset inside that piece's arena.
    pub arena_offset: usize,
}

/// A document stored as a sequence of pieces over two arenas.
#[derive(Debug, Clone, Default)]
pub struct Document {
    original: Arena,
    added: Arena,
    pieces: Vec<Piece>,
    len: usize,
}

impl Document {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a document whose original arena holds `bytes`.
    ///
    /// The piece sequence starts as a single piece covering the whole arena.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let original = Arena::from_bytes(bytes);
        let len = original.len();
        let pieces = if len == 0 {
            Vec::new()
        } else {
            vec![Piece::original(0..len, original.newlines_in(0..len))]
        };
        Self {
            original,
            added: Arena::new(),
            pieces,
            len,
        }
    }

    /// Load a file, refusing anything at or above [`MAX_FILE_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FileTooLarge`] before reading when the file is
    /// too big, or [`EditorError::Io`] when it cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_limit(path, MAX_FILE_BYTES)
    }

    /// Load a file with an explicit size limit in bytes.
    ///
    /// # Errors
    ///
    /// See [`Document::load`].
    pub fn load_with_limit(path: &Path, limit: u64) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        if size >= limit {
            return Err(EditorError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
        let bytes = std::fs::read(path)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "loaded file");
        Ok(Self::from_bytes(bytes))
    }

    /// Total length in bytes.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn arena(&self, kind: ArenaKind) -> &Arena {
        match kind {
            ArenaKind::Original => &self.original,
            ArenaKind::Added => &self.added,
        }
    }

    /// The bytes a piece refers to.
    pub fn piece_bytes(&self, piece: &Piece) -> &[u8] {
        self.arena(piece.arena).slice(piece.range())
    }

    /// Pieces paired with their logical start offsets.
    pub fn spans(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.pieces.iter().scan(0, |logical, piece| {
            let start = *logical;
            *logical += piece.length;
            Some((start, piece))
        })
    }

    /// The full document text.
    pub fn text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for piece in &self.pieces {
            out.extend_from_slice(self.piece_bytes(piece));
        }
        out
    }

    /// Bytes in a logical range, clamped to the document.
    pub fn slice(&self, range: Range<usize>) -> Vec<u8> {
        let start = range.start.min(self.len);
        let end = range.end.min(self.len);
        let mut out = Vec::with_capacity(end.saturating_sub(start));
        for (logical, piece) in self.spans() {
            let piece_end = logical + piece.length;
            if piece_end <= start {
                continue;
            }
            if logical >= end {
                break;
            }
            let from = piece.start + start.saturating_sub(logical);
            let to = piece.start + (end - logical).min(piece.length);
            out.extend_from_slice(self.arena(piece.arena).slice(from..to));
        }
        out
    }

    /// Serialize the document by writing each piece's arena range in order.
    ///
    /// # Errors
    ///
    /// Propagates any error from the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<usize> {
        for piece in &self.pieces {
            writer.write_all(self.piece_bytes(piece))?;
        }
        writer.flush()?;
        Ok(self.len)
    }

    /// Map a logical position to a piece and arena offset.
    ///
    /// A position on a piece boundary resolves to the start of the following
    /// piece. The end of the document resolves to the end of the last piece;
    /// an empty document resolves to piece 0, which does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::OutOfBounds`] past the end of the document.
    pub fn resolve(&self, position: usize) -> Result<Location> {
        if position > self.len {
            return Err(EditorError::OutOfBounds {
                position,
                len: self.len,
            });
        }
        for (index, (logical, piece)) in self.spans().enumerate() {
            if position < logical + piece.length {
                return Ok(Location {
                    piece: index,
                    arena_offset: piece.start + (position - logical),
                });
            }
        }
        Ok(self.pieces.last().map_or(
            Location {
                piece: 0,
                arena_offset: 0,
            },
            |last| Location {
                piece: self.pieces.len() - 1,
                arena_offset: last.end(),
            },
        ))
    }

    /// Index of the piece whose logical range ends exactly at `position`.
    pub fn piece_ending_at(&self, position: usize) -> Option<usize> {
        if position == 0 {
            return None;
        }
        self.spans()
            .position(|(logical, piece)| logical + piece.length == position)
    }

    // --- Low-level mutation used by the edit applier ---

    pub(crate) fn added_len(&self) -> usize {
        self.added.len()
    }

    /// Append typed bytes and return a piece covering them.
    pub(crate) fn append_added(&mut self, bytes: &[u8]) -> Piece {
        let range = self.added.append(bytes);
        let newlines = self.added.newlines_in(range.clone());
        Piece::added(range, newlines)
    }

    /// Grow piece `index` over bytes just appended to its arena.
    pub(crate) fn extend_piece(&mut self, index: usize, by: usize, newlines: &[usize]) {
        self.pieces[index].extend(by, newlines);
        self.len += by;
    }

    /// Replace `range` of the piece sequence, keeping the cached length current.
    pub(crate) fn splice_pieces(&mut self, range: Range<usize>, with: Vec<Piece>) {
        let removed: usize = self.pieces[range.clone()].iter().map(|p| p.length).sum();
        let inserted: usize = with.iter().map(|p| p.length).sum();
        self.pieces.splice(range, with.into_iter().filter(|p| p.length > 0));
        self.len = self.len - removed + inserted;
        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.len,
            self.pieces.iter().map(|p| p.length).sum::<usize>(),
            "cached length drifted from piece lengths"
        );
        debug_assert!(
            self.pieces.iter().all(|p| p.length > 0),
            "zero-length piece left in sequence"
        );
    }

    /// Full structural check: lengths, arena bounds and newline caches.
    ///
    /// Scans every referenced byte, so it is meant for tests.
    pub fn check_invariants(&self) -> bool {
        let lengths_ok = self.len == self.pieces.iter().map(|p| p.length).sum::<usize>();
        lengths_ok
            && self.pieces.iter().all(|p| {
                let arena = self.arena(p.arena);
                p.length > 0 && p.end() <= arena.len() && arena.newlines_in(p.range()) == p.newlines()
            })
    }
}
