// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditKind)
    clippy::module_name_repetitions
)]

//! # Piecemeal
//!
//! A small terminal text editor built on a piece table.
//!
//! - Loaded bytes are never copied or rewritten; typed bytes go to an
//!   append-only arena and the document is a sequence of pieces over both
//! - Each piece caches its newline offsets, so row queries never rescan text
//! - Bursts of keystrokes merge into one pending edit before touching the
//!   piece sequence
//!
//! ## Architecture
//!
//! The terminal shell uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`document`]: Arenas, pieces and line queries
//! - [`editor`]: Edit coalescing, edit application and the editing session
//! - [`ui`]: Viewport, rendering and frame assembly
//! - [`app`]: Main application loop and state
//! - [`config`]: Persistent default flags

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::Document;
    pub use crate::editor::{Direction, Session};
    pub use crate::error::{EditorError, Result};
    pub use crate::ui::viewport::Viewport;
}
