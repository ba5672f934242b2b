use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState},
};
use std::time::Duration;

const STATUS_TTL: Duration = Duration::from_secs(4);
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::Quit => {
            if state.is_dirty && !state.quit_armed {
                state.quit_armed = true;
                state.set_status("Unsaved changes. Press Ctrl+Q again to quit");
            } else {
                state.should_quit = true;
            }
            UpdateResult::Handled(None)
        }
        Action::CancelMode => {
            state.mode = AppMode::Editing;
            state.prompt = None;
            UpdateResult::Handled(None)
        }
        Action::DismissError => {
            state.last_error = None;
            UpdateResult::Handled(None)
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Editing
            } else {
                AppMode::Help
            };
            UpdateResult::Handled(None)
        }
        Action::ToggleFocusMode => {
            state.focus_mode = !state.focus_mode;
            UpdateResult::Handled(None)
        }
        Action::CycleTheme => {
            let next = state.palette_type.next();
            state.set_palette(next);
            state.set_status(format!("Theme: {}", next.label()));
            UpdateResult::Handled(None)
        }
        Action::PromptInput(key) => {
            if let Some(prompt) = &mut state.prompt {
                prompt.text_area.input(*key);
            }
            UpdateResult::Handled(None)
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            let frame = usize::try_from(state.frame_count % SPINNER_FRAMES.len() as u64)
                .unwrap_or_default();
            state.spinner = SPINNER_FRAMES[frame].to_string();
            if state
                .status_clear_time
                .is_some_and(|t| t.elapsed() >= STATUS_TTL)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
            UpdateResult::Handled(None)
        }
        Action::Resize(_, _) => UpdateResult::Handled(None),
        _ => UpdateResult::NotHandled,
    }
}
