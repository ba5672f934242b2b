use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, PromptKind, PromptState},
};
use crate::domain::document::DocumentEngine;
use crate::domain::models::image_mime;
use crate::slash::{KeyDisposition, SlashOutcome};
use std::path::{Path, PathBuf};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::EditorInput(key) => {
            state.document.input(*key);
            UpdateResult::Handled(None)
        }
        Action::Paste(text) => {
            if let Some(path) = dropped_image_path(text) {
                tracing::debug!(path = %path.display(), "paste looks like an image drop");
                return UpdateResult::Handled(Some(Command::LoadImage(path)));
            }
            state.document.insert_text(text);
            UpdateResult::Handled(None)
        }
        Action::ApplyFormat(format) => {
            state.document.apply_format(*format);
            UpdateResult::Handled(None)
        }
        Action::SlashKey(key) => {
            match state.slash.handle_key(*key, &mut state.document) {
                // Closed since the key was mapped; the editor gets it.
                KeyDisposition::PassThrough => {
                    state.document.input(key.key_event());
                }
                KeyDisposition::Consumed => {}
                KeyDisposition::Executed(outcome) => on_slash_outcome(state, outcome),
            }
            UpdateResult::Handled(None)
        }
        Action::SlashActivate(index) => {
            if let Some(outcome) = state.slash.activate(*index, &mut state.document) {
                on_slash_outcome(state, outcome);
            }
            UpdateResult::Handled(None)
        }
        Action::ImageLoaded(image) => {
            state.document.insert_image(image);
            tracing::info!(
                name = %image.name,
                mime = image.mime,
                bytes = image.bytes.len(),
                "image inserted"
            );
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn on_slash_outcome(state: &mut AppState, outcome: SlashOutcome) {
    match outcome {
        SlashOutcome::Applied(_) => {}
        SlashOutcome::PickImage => {
            state.mode = AppMode::Prompt;
            state.prompt = Some(PromptState::new(PromptKind::InsertImage, ""));
        }
    }
}

/// A paste that is exactly one path to an existing image file. Terminals
/// deliver drag-and-drop this way, sometimes quoted or as a `file://` URL.
fn dropped_image_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') {
        return None;
    }
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .unwrap_or(trimmed);
    let raw = unquoted.strip_prefix("file://").unwrap_or(unquoted);

    let path = Path::new(raw);
    (image_mime(path).is_some() && path.is_file()).then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::update as reduce;
    use crate::domain::models::{Format, ImageData};
    use crate::slash::PaletteKey;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            reduce(
                state,
                Action::EditorInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
    }

    #[test]
    fn test_typing_slash_opens_palette_and_marks_dirty() {
        let mut state = AppState::default();
        type_str(&mut state, "/h");

        assert!(state.slash.is_open());
        assert!(state.is_dirty);
        let visible: Vec<_> = state.slash.visible().map(|(c, _)| c.trigger).collect();
        assert_eq!(visible, ["/h1", "/h2", "/h3"]);
    }

    #[test]
    fn test_slash_enter_applies_heading() {
        let mut state = AppState::default();
        type_str(&mut state, "/h");
        reduce(&mut state, Action::SlashKey(PaletteKey::Down));
        reduce(&mut state, Action::SlashKey(PaletteKey::Enter));

        assert_eq!(state.document.text(), "## ");
        assert!(!state.slash.is_open());

        type_str(&mut state, "Title");
        assert_eq!(state.document.text(), "## Title");
        assert!(!state.slash.is_open());
    }

    #[test]
    fn test_pass_through_reaches_editor() {
        let mut state = AppState::default();
        type_str(&mut state, "ab");
        reduce(&mut state, Action::SlashKey(PaletteKey::Enter));
        assert_eq!(state.document.lines(), ["ab", ""]);
    }

    #[test]
    fn test_img_command_opens_image_prompt() {
        let mut state = AppState::default();
        type_str(&mut state, "see /img");
        reduce(&mut state, Action::SlashKey(PaletteKey::Enter));

        assert_eq!(state.document.text(), "see ");
        assert_eq!(state.mode, AppMode::Prompt);
        assert_eq!(
            state.prompt.as_ref().map(|p| p.kind),
            Some(PromptKind::InsertImage)
        );
    }

    #[test]
    fn test_pointer_activation() {
        let mut state = AppState::default();
        type_str(&mut state, "/q");
        reduce(&mut state, Action::SlashActivate(0));
        assert_eq!(state.document.text(), "> ");
    }

    #[test]
    fn test_format_shortcut_bypasses_palette() {
        let mut state = AppState::default();
        type_str(&mut state, "Intro");
        reduce(&mut state, Action::ApplyFormat(Format::Heading(1)));
        assert_eq!(state.document.text(), "# Intro");
    }

    #[test]
    fn test_plain_paste_is_inserted() {
        let mut state = AppState::default();
        let cmd = reduce(&mut state, Action::Paste("/not/an/image.png".to_string()));
        assert_eq!(cmd, None);
        assert_eq!(state.document.text(), "/not/an/image.png");
    }

    #[test]
    fn test_image_drop_becomes_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let mut state = AppState::default();
        let quoted = format!("'{}'\n", path.display());
        let cmd = reduce(&mut state, Action::Paste(quoted));
        assert_eq!(cmd, Some(Command::LoadImage(path)));
        assert!(state.document.is_blank());
    }

    #[test]
    fn test_image_loaded_inserts_markdown() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            Action::ImageLoaded(ImageData {
                name: "a.png".to_string(),
                mime: "image/png",
                bytes: b"abc".to_vec(),
            }),
        );
        assert_eq!(state.document.text(), "![a.png](data:image/png;base64,YWJj)");
        assert!(state.is_dirty);
    }
}
