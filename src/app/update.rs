use std::time::Instant;

use crate::app::{MessageLevel, Model};
use crate::editor::Direction;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert one byte at the cursor
    InsertByte(u8),
    /// Split the row at the cursor
    InsertNewline,
    /// Delete the byte before the cursor
    DeleteBack,
    /// Delete the byte under the cursor
    DeleteForward,

    // Navigation
    /// Move the cursor one step
    MoveCursor(Direction),
    /// Start of row
    MoveHome,
    /// End of row
    MoveEnd,
    /// Up one screen
    PageUp,
    /// Down one screen
    PageDown,

    // Application
    /// Write the document to its file
    Save,
    /// Quit, asking for confirmation when there are unsaved changes
    Quit,
    /// Terminal resized
    Resize(u16, u16),
}

impl Message {
    const fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertByte(_) | Self::InsertNewline | Self::DeleteBack | Self::DeleteForward
        )
    }
}

/// Apply `msg` to the model. Side effects such as writing the file happen
/// afterwards in [`crate::app::App`].
pub fn update(mut model: Model, msg: Message, now: Instant) -> Model {
    if !matches!(msg, Message::Quit) {
        model.quit_armed = false;
    }

    if msg.is_edit() && model.read_only {
        model.show_message(MessageLevel::Warning, "buffer is read-only");
        return model;
    }

    match msg {
        Message::InsertByte(byte) => model.session.insert_byte(byte, now),
        Message::InsertNewline => model.session.insert_newline(now),
        Message::DeleteBack => model.session.delete_back(now),
        Message::DeleteForward => model.session.delete_forward(now),

        Message::MoveCursor(direction) => model.session.move_cursor(direction),
        Message::MoveHome => model.session.move_home(),
        Message::MoveEnd => model.session.move_end(),
        Message::PageUp => model.session.page_up(),
        Message::PageDown => model.session.page_down(),

        // Written by the effect handler; only the pending edit is settled here.
        Message::Save => model.session.flush(),
        Message::Quit => {
            if model.session.is_dirty() && !model.quit_armed {
                model.quit_armed = true;
                model.show_message(
                    MessageLevel::Warning,
                    "unsaved changes - press Ctrl-Q again to quit",
                );
            } else {
                model.should_quit = true;
            }
        }
        Message::Resize(width, height) => model.session.resize(width, height),
    }

    model
}
