//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{MessageLevel, Model};
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::document::MAX_FILE_BYTES;
use crate::editor::DEFAULT_MERGE_WINDOW;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    read_only: bool,
    merge_window: Duration,
    size_limit: u64,
}

impl App {
    /// Create a new application for the given file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            read_only: false,
            merge_window: DEFAULT_MERGE_WINDOW,
            size_limit: MAX_FILE_BYTES,
        }
    }

    /// Open the file without allowing edits or saves.
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set how far apart keystrokes may be and still merge into one edit.
    #[must_use]
    pub const fn with_merge_window(mut self, window: Duration) -> Self {
        self.merge_window = window;
        self
    }

    /// Refuse files of `limit` bytes or more.
    #[must_use]
    pub const fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests;
