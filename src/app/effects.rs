use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;

use crate::app::{App, Message, MessageLevel, Model};

impl App {
    /// Run the I/O that follows a message once [`crate::app::update`] has
    /// settled the model.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::Save) {
            Self::save(model);
        }
    }

    fn save(model: &mut Model) {
        if model.read_only {
            model.show_message(MessageLevel::Warning, "buffer is read-only");
            return;
        }
        match write_file(model) {
            Ok(written) => {
                tracing::info!(path = %model.file_path.display(), written, "saved");
                model.show_message(
                    MessageLevel::Info,
                    format!("{written} bytes written to {}", model.file_path.display()),
                );
            }
            Err(err) => {
                tracing::warn!(path = %model.file_path.display(), "save failed: {err:#}");
                model.show_message(MessageLevel::Error, format!("{err:#}"));
            }
        }
    }
}

fn write_file(model: &mut Model) -> anyhow::Result<usize> {
    let _scope = crate::perf::scope("app.save");
    let file = File::create(&model.file_path)
        .with_context(|| format!("can't open {}", model.file_path.display()))?;
    let mut writer = BufWriter::new(file);
    model
        .session
        .save_to(&mut writer)
        .with_context(|| format!("can't write {}", model.file_path.display()))
}
