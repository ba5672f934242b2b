use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    persistence::push_recent,
    state::{AppMode, AppState, ErrorSeverity, ErrorState, PromptKind, PromptState},
};
use std::path::{Path, PathBuf};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SaveIntent => match state.file_path.clone() {
            Some(path) => UpdateResult::Handled(Some(save_command(state, path))),
            None => open_prompt(state, PromptKind::SaveAs, ""),
        },
        Action::SaveAsIntent => {
            let current = state
                .file_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            open_prompt(state, PromptKind::SaveAs, &current)
        }
        Action::OpenIntent => open_prompt(state, PromptKind::Open, ""),
        Action::InsertImageIntent => open_prompt(state, PromptKind::InsertImage, ""),
        Action::PromptSubmit => {
            let Some(prompt) = &state.prompt else {
                return UpdateResult::NotHandled;
            };
            let value = prompt.text_area.value();
            if value.is_empty() {
                return UpdateResult::Handled(None);
            }
            let kind = prompt.kind;
            let path = expand_path(&value);
            state.prompt = None;
            state.mode = AppMode::Editing;

            let command = match kind {
                PromptKind::Open => Command::LoadNote(path),
                PromptKind::SaveAs => save_command(state, path),
                PromptKind::InsertImage => Command::LoadImage(path),
            };
            UpdateResult::Handled(Some(command))
        }
        Action::NoteLoaded(path, text) => {
            state.load_document(text, Some(path.clone()));
            tracing::info!(path = %path.display(), chars = text.chars().count(), "note loaded");
            UpdateResult::Handled(remember_file(state, path))
        }
        Action::NoteSaved(path, generation) => {
            if *generation == state.generation {
                state.file_path = Some(path.clone());
                state.is_dirty = state.saving_revision.take() != Some(state.revision);
                state.quit_armed = false;
            } else {
                // Another note was opened while this write was in flight.
                tracing::debug!(path = %path.display(), "save finished for a replaced document");
            }
            UpdateResult::Handled(remember_file(state, path))
        }
        Action::OperationStarted(msg) => {
            state.active_tasks.push(msg.clone());
            UpdateResult::Handled(None)
        }
        Action::OperationCompleted(task, result) => {
            if let Some(index) = state.active_tasks.iter().position(|t| t == task) {
                state.active_tasks.remove(index);
            }
            match result {
                Ok(msg) => state.set_status(msg.clone()),
                Err(err) => {
                    state.last_error = Some(ErrorState::new(err.clone(), ErrorSeverity::Error));
                }
            }
            UpdateResult::Handled(None)
        }
        Action::ErrorOccurred(err) => {
            state.last_error = Some(ErrorState::new(err.clone(), ErrorSeverity::Error));
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn save_command(state: &mut AppState, path: PathBuf) -> Command {
    state.saving_revision = Some(state.revision);
    Command::SaveNote(path, state.document.text(), state.generation)
}

fn open_prompt(state: &mut AppState, kind: PromptKind, initial: &str) -> UpdateResult {
    state.mode = AppMode::Prompt;
    state.prompt = Some(PromptState::new(kind, initial));
    UpdateResult::Handled(None)
}

fn remember_file(state: &mut AppState, path: &Path) -> Option<Command> {
    push_recent(&mut state.recent_files, path);
    state
        .recent_files_path
        .clone()
        .map(|config| Command::SaveRecentFiles(config, state.recent_files.clone()))
}

/// `~/notes.md` style paths resolve against the home directory.
fn expand_path(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => home::home_dir().map_or_else(|| PathBuf::from(raw), |h| h.join(rest)),
        None => PathBuf::from(raw),
    }
}
