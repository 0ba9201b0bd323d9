//! Error types shared by the document model and the terminal shell.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the editor core.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A logical position past the end of the document was resolved.
    ///
    /// Callers clamp positions before resolving, so this never reaches the user.
    #[error("position {position} is out of bounds (document length {len})")]
    OutOfBounds { position: usize, len: usize },

    /// The file exceeds the load size limit. Nothing was read.
    #[error("{} is {size} bytes, over the {limit} byte limit", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The terminal size or mode could not be queried.
    #[error("terminal unavailable: {0}")]
    IoUnavailable(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EditorError>;
