use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::state::{AppMode, AppState};
use crate::domain::models::ImageData;
use crate::domain::storage::MockNoteStore;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_load_note_success() {
    let mut mock = MockNoteStore::new();
    mock.expect_read_note()
        .withf(|p| p == std::path::Path::new("notes/today.md"))
        .returning(|_| Ok("# Today\n".to_string()));

    let (tx, mut rx) = mpsc::channel(4);
    handle_command(
        Command::LoadNote(PathBuf::from("notes/today.md")),
        Arc::new(mock),
        tx,
    )
    .unwrap();

    let started = rx.recv().await.unwrap();
    assert!(matches!(started, Action::OperationStarted(ref m) if m.contains("today.md")));

    let loaded = rx.recv().await.unwrap();
    assert_eq!(
        loaded,
        Action::NoteLoaded(PathBuf::from("notes/today.md"), "# Today\n".to_string())
    );

    let done = rx.recv().await.unwrap();
    assert_eq!(
        done,
        Action::OperationCompleted(
            "Opening today.md".to_string(),
            Ok("Opened today.md".to_string())
        )
    );
}

#[tokio::test]
async fn test_save_note_passes_contents() {
    let mut mock = MockNoteStore::new();
    mock.expect_write_note()
        .withf(|p, contents| p == std::path::Path::new("a.md") && contents == "body")
        .times(1)
        .returning(|_, _| Ok(()));

    let (tx, mut rx) = mpsc::channel(4);
    handle_command(
        Command::SaveNote(PathBuf::from("a.md"), "body".to_string(), 3),
        Arc::new(mock),
        tx,
    )
    .unwrap();

    rx.recv().await.unwrap();
    assert_eq!(
        rx.recv().await.unwrap(),
        Action::NoteSaved(PathBuf::from("a.md"), 3)
    );
}

#[tokio::test]
async fn test_full_command_error_to_state() {
    let mut mock = MockNoteStore::new();
    mock.expect_read_image()
        .returning(|_| Err(anyhow::anyhow!("unsupported image type: notes.txt")));

    let (tx, mut rx) = mpsc::channel(4);
    let mut state = AppState::default();

    handle_command(
        Command::LoadImage(PathBuf::from("notes.txt")),
        Arc::new(mock),
        tx,
    )
    .unwrap();

    let started = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, started);
    assert!(state.active_tasks.iter().any(|t| t.contains("Reading")));

    let failed = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, failed);

    assert!(state.active_tasks.is_empty());
    assert_eq!(state.mode, AppMode::Editing);
    assert!(state.document.is_blank());
    let err = state.last_error.unwrap();
    assert!(err.message.contains("Error: unsupported image type"));
    assert!(!err.suggestions.is_empty());
}

#[tokio::test]
async fn test_loop_applies_initial_load_and_quits() {
    let mut mock = MockNoteStore::new();
    mock.expect_read_note()
        .returning(|_| Ok("# Hello".to_string()));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(10);

    let driver = tokio::spawn(async move {
        // Give the initial load a moment to land before quitting.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let _ = event_tx
            .send(Ok(Event::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
            ))))
            .await;
    });

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        run_loop_with_events(
            &mut terminal,
            AppState::default(),
            Arc::new(mock),
            Some(Command::LoadNote(PathBuf::from("hello.md"))),
            event_rx,
        ),
    )
    .await;

    assert!(result.expect("loop did not quit").is_ok());
    driver.await.unwrap();
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let mut mock = MockNoteStore::new();
    mock.expect_read_note()
        .returning(|_| Ok("# Loaded\n\nSome *text* /h".to_string()));
    mock.expect_write_note().returning(|_, _| Ok(()));
    mock.expect_read_image().returning(|path| {
        Ok(ImageData {
            name: path.display().to_string(),
            mime: "image/png",
            bytes: vec![0x89, b'P', b'N', b'G'],
        })
    });

    let store = Arc::new(mock);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let app_state = AppState::default();

    let (event_tx, event_rx) = mpsc::channel(100);

    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=4 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                5..=12 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                13..=15 => generate_random_paste(&mut rng),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // A dirty note needs the quit key twice; extra presses are harmless.
        for _ in 0..3 {
            let _ = event_tx
                .send(Ok(Event::Key(KeyEvent::new(
                    KeyCode::Char('q'),
                    KeyModifiers::CONTROL,
                ))))
                .await;
        }
    });

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(&mut terminal, app_state, store, None, event_rx),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..24) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::PageUp,
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        14 => KeyCode::F(rng.gen_range(1..=3)),
        15..=17 => KeyCode::Char('/'),
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_paste<R: Rng>(rng: &mut R) -> Event {
    let text = match rng.gen_range(0..4) {
        0 => "line one\nline two\r\n".to_string(),
        1 => "'/tmp/dropped image.png'".to_string(),
        2 => "file:///tmp/photo.jpg".to_string(),
        _ => "/code".to_string(),
    };
    Event::Paste(text)
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..5) {
        0 | 1 => MouseEventKind::Down(MouseButton::Left),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}
