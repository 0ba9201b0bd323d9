//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Cursor and scroll position management
//! - [`render`]: Projection of the document onto screen rows
//! - [`frame`]: One-write frame assembly

pub mod frame;
pub mod render;
pub mod viewport;

mod status;

use std::io;

use crate::app::Model;

pub use status::{message_line, status_line};

/// Render the complete screen for `model` into one byte buffer.
pub fn draw(model: &mut Model) -> io::Result<Vec<u8>> {
    let rows = model.session.render();
    let width = model.session.viewport().width();
    let status = status_line(model, width);
    let message = message_line(model, width);
    frame::compose(&rows, &status, &message, model.session.screen_cursor())
}
