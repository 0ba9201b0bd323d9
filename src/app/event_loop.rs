use std::io::{self, IsTerminal, Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use crate::app::{App, Model, update};
use crate::error::EditorError;

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(stdout(), EnterAlternateScreen) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        tracing::debug!("terminal entered raw mode");
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), LeaveAlternateScreen, Show);
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal restored");
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin/stdout is not a terminal, the terminal
    /// size cannot be queried, or drawing a frame fails.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Everything that can fail before raw mode is checked first.
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(EditorError::IoUnavailable(io::Error::other(
                "stdin and stdout must be a terminal",
            )))
            .context("piecemeal requires an interactive terminal");
        }
        let (width, height) = terminal::size()
            .map_err(EditorError::IoUnavailable)
            .context("Failed to query terminal size")?;

        let mut model = self.open_model();
        model.session.resize(width, height);
        tracing::info!(
            path = %model.file_path.display(),
            bytes = model.session.document().len(),
            width,
            height,
            "session started"
        );

        let guard = TerminalGuard::enter()
            .map_err(EditorError::IoUnavailable)
            .context("Failed to initialize terminal")?;
        let result = Self::event_loop(&mut model);
        drop(guard);

        tracing::info!(
            edits = model.session.materialized_edits(),
            pieces = model.session.document().pieces().len(),
            "session ended"
        );
        result
    }

    pub(super) fn open_model(&self) -> Model {
        let mut model = Model::open(self.file_path.clone(), self.size_limit, self.merge_window);
        model.read_only |= self.read_only;
        model
    }

    fn event_loop(model: &mut Model) -> Result<()> {
        let mut out = stdout();
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_message(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                needs_render |= Self::dispatch(model, &event::read()?);

                // Drain queued input so key repeat and paste coalesce into
                // one edit and one frame.
                let mut drained = 0_u32;
                while event::poll(Duration::ZERO)? {
                    if Self::dispatch(model, &event::read()?) {
                        drained += 1;
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    tracing::trace!(frame = frame_idx, drained, "drained input");
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                frame_idx += 1;
                let frame = crate::ui::draw(model).context("Failed to compose frame")?;
                out.write_all(&frame)?;
                out.flush()?;
                needs_render = false;
            }
        }
        Ok(())
    }

    /// Turn one terminal event into a model update. Returns whether the
    /// model changed.
    fn dispatch(model: &mut Model, event: &Event) -> bool {
        let Some(msg) = Self::handle_event(event) else {
            return false;
        };
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg, Instant::now());
        Self::handle_message_side_effects(model, &side_msg);
        true
    }
}
