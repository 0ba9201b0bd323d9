use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message};
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        // Release and repeat reports arrive on terminals with enhanced keyboard support.
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('q') => Some(Message::Quit),
                _ => None,
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii() && !c.is_ascii_control() => {
                u8::try_from(c).ok().map(Message::InsertByte)
            }
            KeyCode::Tab => Some(Message::InsertByte(b'\t')),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),

            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }
}
