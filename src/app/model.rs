use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::editor::Session;
use crate::error::EditorError;

/// How long a status message stays on screen.
const MESSAGE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    level: MessageLevel,
    text: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// The open document with its cursor and pending edit
    pub session: Session,
    /// File the document is saved to
    pub file_path: PathBuf,
    /// Refuse edits and saves
    pub read_only: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// A quit was refused because of unsaved changes; the next quit goes through
    pub(super) quit_armed: bool,
    message: Option<StatusMessage>,
}

impl Model {
    pub fn new(file_path: PathBuf, session: Session) -> Self {
        Self {
            session,
            file_path,
            ..Self::default()
        }
    }

    /// Open `file_path`, turning load failures into an empty buffer plus a
    /// status message instead of an error.
    ///
    /// A missing file opens empty and is created on save. A file over
    /// `limit` bytes, or one that cannot be read, opens empty and read-only
    /// so it cannot be clobbered.
    pub fn open(file_path: PathBuf, limit: u64, merge_window: Duration) -> Self {
        let _scope = crate::perf::scope("app.open");
        let (document, read_only, message) = match Document::load_with_limit(&file_path, limit) {
            Ok(doc) => (doc, false, None),
            Err(EditorError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => (
                Document::empty(),
                false,
                Some((MessageLevel::Info, "new file".to_string())),
            ),
            Err(err) => {
                tracing::warn!(path = %file_path.display(), %err, "load failed");
                (
                    Document::empty(),
                    true,
                    Some((MessageLevel::Error, err.to_string())),
                )
            }
        };

        let session = Session::new(document).with_merge_window(merge_window);
        let mut model = Self::new(file_path, session);
        model.read_only = read_only;
        if let Some((level, text)) = message {
            model.show_message(level, text);
        }
        model
    }

    pub(crate) fn show_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            level,
            text: text.into(),
            expires_at: Instant::now() + MESSAGE_TTL,
        });
    }

    /// Drop the message once it has expired. Returns whether one was dropped.
    pub(super) fn expire_message(&mut self, now: Instant) -> bool {
        if self
            .message
            .as_ref()
            .is_some_and(|message| message.expires_at <= now)
        {
            self.message = None;
            return true;
        }
        false
    }

    pub fn active_message(&self) -> Option<(&str, MessageLevel)> {
        self.message
            .as_ref()
            .map(|message| (message.text.as_str(), message.level))
    }
}
