use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

use crate::document::Document;
use crate::editor::{DEFAULT_MERGE_WINDOW, Direction, Session};

use super::{App, Message, MessageLevel, Model, update};

fn create_test_model(text: &str) -> Model {
    let doc = Document::from_bytes(text.as_bytes().to_vec());
    Model::new(PathBuf::from("test.txt"), Session::new(doc))
}

fn apply_all(mut model: Model, msgs: Vec<Message>) -> Model {
    let now = Instant::now();
    for msg in msgs {
        model = update(model, msg, now);
    }
    model
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_typing_updates_document_after_flush() {
    let model = apply_all(
        create_test_model(""),
        vec![
            Message::InsertByte(b'h'),
            Message::InsertByte(b'i'),
            Message::InsertNewline,
        ],
    );
    let mut model = model;
    model.session.flush();
    assert_eq!(model.session.document().text(), b"hi\n");
    assert_eq!(model.session.materialized_edits(), 1);
    assert!(model.session.is_dirty());
}

#[test]
fn test_read_only_refuses_edits() {
    let mut model = create_test_model("abc");
    model.read_only = true;
    let mut model = update(model, Message::InsertByte(b'x'), Instant::now());
    model.session.flush();
    assert_eq!(model.session.document().text(), b"abc");
    assert!(!model.session.is_dirty());
    assert_eq!(
        model.active_message(),
        Some(("buffer is read-only", MessageLevel::Warning))
    );
}

#[test]
fn test_read_only_still_moves_cursor() {
    let mut model = create_test_model("abc");
    model.read_only = true;
    let model = update(model, Message::MoveEnd, Instant::now());
    assert_eq!(model.session.viewport().cursor(), (0, 3));
}

#[test]
fn test_quit_on_clean_buffer_is_immediate() {
    let model = update(create_test_model("abc"), Message::Quit, Instant::now());
    assert!(model.should_quit);
}

#[test]
fn test_quit_on_dirty_buffer_needs_confirmation() {
    let model = apply_all(
        create_test_model(""),
        vec![Message::InsertByte(b'x'), Message::Quit],
    );
    assert!(!model.should_quit);
    assert_eq!(model.active_message().map(|(_, level)| level), Some(MessageLevel::Warning));

    let model = update(model, Message::Quit, Instant::now());
    assert!(model.should_quit);
}

#[test]
fn test_other_message_disarms_quit_confirmation() {
    let model = apply_all(
        create_test_model(""),
        vec![
            Message::InsertByte(b'x'),
            Message::Quit,
            Message::MoveCursor(Direction::Left),
            Message::Quit,
        ],
    );
    assert!(!model.should_quit);
}

#[test]
fn test_resize_updates_viewport() {
    let model = update(create_test_model(""), Message::Resize(100, 40), Instant::now());
    assert_eq!(model.session.viewport().width(), 100);
    assert_eq!(model.session.viewport().height(), 40);
}

#[test]
fn test_message_expires() {
    let mut model = create_test_model("");
    model.show_message(MessageLevel::Info, "hello");
    assert!(!model.expire_message(Instant::now()));
    assert!(model.expire_message(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_message().is_none());
}

#[test]
fn test_key_mapping_for_printable_and_control_keys() {
    let none = KeyModifiers::NONE;
    assert_eq!(
        App::handle_key(key(KeyCode::Char('a'), none)),
        Some(Message::InsertByte(b'a'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
        Some(Message::InsertByte(b'A'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Tab, none)),
        Some(Message::InsertByte(b'\t'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter, none)),
        Some(Message::InsertNewline)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
        Some(Message::Save)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        Some(Message::Quit)
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    assert_eq!(App::handle_key(key(KeyCode::Char('é'), none)), None);
    assert_eq!(
        App::handle_key(key(KeyCode::PageDown, none)),
        Some(Message::PageDown)
    );
}

#[test]
fn test_key_release_is_ignored() {
    let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
    release.kind = KeyEventKind::Release;
    assert_eq!(App::handle_key(release), None);
}

#[test]
fn test_resize_event_maps_to_message() {
    assert_eq!(
        App::handle_event(&Event::Resize(10, 5)),
        Some(Message::Resize(10, 5))
    );
}

#[test]
fn test_open_missing_file_is_new_and_writable() {
    let dir = tempdir().unwrap();
    let model = Model::open(dir.path().join("new.txt"), 1024, DEFAULT_MERGE_WINDOW);
    assert!(model.session.document().is_empty());
    assert!(!model.read_only);
    assert_eq!(model.active_message(), Some(("new file", MessageLevel::Info)));
}

#[test]
fn test_open_oversized_file_is_empty_and_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, vec![b'x'; 64]).unwrap();
    let model = Model::open(path, 64, DEFAULT_MERGE_WINDOW);
    assert!(model.session.document().is_empty());
    assert!(model.read_only);
    assert_eq!(model.active_message().map(|(_, level)| level), Some(MessageLevel::Error));
}

#[test]
fn test_app_builder_options_reach_model() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    std::fs::write(&path, "hello\n").unwrap();
    let app = App::new(path)
        .with_read_only(true)
        .with_merge_window(Duration::from_millis(10));
    let model = app.open_model();
    assert!(model.read_only);
    assert_eq!(model.session.document().text(), b"hello\n");
}

#[test]
fn test_save_effect_writes_file_and_reports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut model = Model::open(path.clone(), 1024, DEFAULT_MERGE_WINDOW);
    model = apply_all(
        model,
        vec![
            Message::InsertByte(b'o'),
            Message::InsertByte(b'k'),
            Message::Save,
        ],
    );
    App::handle_message_side_effects(&mut model, &Message::Save);

    assert_eq!(std::fs::read(&path).unwrap(), b"ok");
    assert!(!model.session.is_dirty());
    let (text, level) = model.active_message().unwrap();
    assert_eq!(level, MessageLevel::Info);
    assert!(text.starts_with("2 bytes written"));
}

#[test]
fn test_save_effect_refused_when_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ro.txt");
    std::fs::write(&path, "keep").unwrap();
    let mut model = Model::open(path.clone(), 1024, DEFAULT_MERGE_WINDOW);
    model.read_only = true;
    App::handle_message_side_effects(&mut model, &Message::Save);
    assert_eq!(std::fs::read(&path).unwrap(), b"keep");
    assert_eq!(model.active_message().map(|(_, level)| level), Some(MessageLevel::Warning));
}

#[test]
fn test_save_failure_becomes_error_message() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("x.txt");
    let mut model = Model::open(path, 1024, DEFAULT_MERGE_WINDOW);
    App::handle_message_side_effects(&mut model, &Message::Save);
    assert_eq!(model.active_message().map(|(_, level)| level), Some(MessageLevel::Error));
}

#[test]
fn test_draw_produces_status_and_text() {
    let mut model = create_test_model("hello\nworld");
    model.session.resize(30, 6);
    let frame = crate::ui::draw(&mut model).unwrap();
    let text = String::from_utf8_lossy(&frame);
    assert!(text.contains("hello"));
    assert!(text.contains("world"));
    assert!(text.contains("test.txt - 2 lines"));
}
