use crate::app::{MessageLevel, Model};

/// The reverse-video line under the text area: file name, row count and
/// flags on the left, cursor position on the right.
pub fn status_line(model: &Model, width: u16) -> String {
    let filename = model
        .file_path
        .file_name()
        .map_or_else(|| "[no name]".to_string(), |s| s.to_string_lossy().to_string());
    let doc = model.session.document();
    let modified = if model.session.is_dirty() {
        " (modified)"
    } else {
        ""
    };
    let read_only = if model.read_only { " [read-only]" } else { "" };
    let left = format!(" {filename} - {} lines{modified}{read_only}", doc.row_count());

    let (row, col) = model.session.viewport().cursor();
    let right = format!("{}:{} ", row + 1, col + 1);

    let width = usize::from(width);
    let left_len = left.chars().count();
    let right_len = right.chars().count();
    if left_len + right_len <= width {
        format!("{left}{}{right}", " ".repeat(width - left_len - right_len))
    } else {
        fit(&left, width)
    }
}

/// The line under the status bar: the active message, if any.
pub fn message_line(model: &Model, width: u16) -> String {
    match model.active_message() {
        Some((text, MessageLevel::Error)) => fit(&format!("error: {text}"), usize::from(width)),
        Some((text, _)) => fit(text, usize::from(width)),
        None => String::new(),
    }
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::editor::Session;
    use std::path::PathBuf;

    fn model(text: &str) -> Model {
        Model::new(
            PathBuf::from("/tmp/notes.txt"),
            Session::new(Document::from_bytes(text.as_bytes().to_vec())),
        )
    }

    #[test]
    fn test_status_line_shows_name_rows_and_position() {
        let line = status_line(&model("a\nb\nc"), 40);
        assert_eq!(line.chars().count(), 40);
        assert!(line.starts_with(" notes.txt - 3 lines"));
        assert!(line.ends_with("1:1 "));
    }

    #[test]
    fn test_status_line_flags() {
        let mut m = model("x");
        m.read_only = true;
        let line = status_line(&m, 60);
        assert!(line.contains("[read-only]"));
        assert!(!line.contains("modified"));
    }

    #[test]
    fn test_status_line_truncates_on_narrow_screen() {
        let line = status_line(&model("x"), 5);
        assert_eq!(line, " note");
    }

    #[test]
    fn test_message_line_is_blank_without_message() {
        assert_eq!(message_line(&model(""), 10), "");
    }

    #[test]
    fn test_message_line_prefixes_errors() {
        let mut m = model("");
        m.show_message(MessageLevel::Error, "disk full");
        assert_eq!(message_line(&m, 20), "error: disk full    ");
    }
}
