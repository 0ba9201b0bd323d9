//! Editing on top of the piece-table document.
//!
//! Keystrokes become single-character [`Edit`]s, the [`Coalescer`] folds
//! bursts of them into one pending edit, and [`apply`] materializes it into
//! the piece sequence. [`Session`] ties this to the cursor and viewport.

mod apply;
mod coalesce;
mod session;

pub use apply::{apply, delete, insert};
pub use coalesce::{Coalescer, DEFAULT_MERGE_WINDOW, Edit, EditKind};
pub use session::Session;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}
