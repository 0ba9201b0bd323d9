//! Materializes edits into the piece sequence.
//!
//! Arena bytes are never overwritten: inserts append to the added arena
//! and splice a piece in, deletes only shrink, split or drop pieces.

use std::ops::Range;

use crate::document::{ArenaKind, Document};

use super::coalesce::{Edit, EditKind};

/// Fold a flushed edit into the document.
pub fn apply(doc: &mut Document, edit: &Edit) {
    match &edit.kind {
        EditKind::Insert(payload) => insert(doc, edit.position, payload),
        EditKind::Delete(len) => delete(doc, edit.position..edit.position + len),
    }
}

/// Insert `bytes` at a logical position, clamped to the document end.
pub fn insert(doc: &mut Document, position: usize, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    let position = position.min(doc.len());

    // Typing at the end of the most recent added piece just grows it.
    if let Some(index) = doc.piece_ending_at(position) {
        let piece = &doc.pieces()[index];
        if piece.arena == ArenaKind::Added && piece.end() == doc.added_len() {
            let fresh = doc.append_added(bytes);
            doc.extend_piece(index, fresh.length, fresh.newlines());
            return;
        }
    }

    let location = match doc.resolve(position) {
        Ok(location) => location,
        Err(err) => {
            debug_assert!(false, "clamped insert failed to resolve: {err}");
            return;
        }
    };
    let fresh = doc.append_added(bytes);
    let index = location.piece;

    match doc.pieces().get(index) {
        None => doc.splice_pieces(0..0, vec![fresh]),
        Some(target) if location.arena_offset == target.start => {
            doc.splice_pieces(index..index, vec![fresh]);
        }
        Some(target) if location.arena_offset == target.end() => {
            doc.splice_pieces(index + 1..index + 1, vec![fresh]);
        }
        Some(target) => {
            let (left, right) = target.split_at(location.arena_offset);
            doc.splice_pieces(index..index + 1, vec![left, fresh, right]);
        }
    }
}

/// Delete a logical range. The range is clipped to the document; an empty
/// clipped range does nothing.
pub fn delete(doc: &mut Document, range: Range<usize>) {
    let start = range.start.min(doc.len());
    let end = range.end.min(doc.len());
    if start >= end {
        return;
    }

    let mut touched: Option<Range<usize>> = None;
    let mut kept = Vec::with_capacity(2);
    for (index, (logical, piece)) in doc.spans().enumerate() {
        let piece_end = logical + piece.length;
        if piece_end <= start {
            continue;
        }
        if logical >= end {
            break;
        }
        touched = Some(touched.map_or(index..index + 1, |t| t.start..index + 1));
        if logical < start {
            kept.push(piece.sub_piece(piece.start..piece.start + (start - logical)));
        }
        if piece_end > end {
            kept.push(piece.sub_piece(piece.start + (end - logical)..piece.end()));
        }
    }

    if let Some(touched) = touched {
        doc.splice_pieces(touched, kept);
    }
}
