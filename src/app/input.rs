use crate::app::{
    action::Action,
    state::{AppMode, AppState},
};
use crate::slash::PaletteKey;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

/// Row of the slash palette under a click, if any. The palette is drawn with
/// a one-cell border.
pub fn resolve_palette_click(area: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column > area.x
        && column < area.x + area.width.saturating_sub(1)
        && row > area.y
        && row < area.y + area.height.saturating_sub(1);
    inside.then(|| usize::from(row - (area.y + 1)))
}

pub fn map_event_to_action(event: Event, app_state: &AppState<'_>) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Release {
            return None;
        }
    }

    match &event {
        Event::Resize(w, h) => return Some(Action::Resize(*w, *h)),
        Event::Key(key) if app_state.keymap.get_action(*key) == Some(Action::Quit) => {
            return Some(Action::Quit);
        }
        _ => {}
    }

    if app_state.last_error.is_some() {
        return match event {
            Event::Key(key) if matches!(key.code, KeyCode::Esc | KeyCode::Enter) => {
                Some(Action::DismissError)
            }
            _ => None,
        };
    }

    match app_state.mode {
        AppMode::Prompt => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Enter => Some(Action::PromptSubmit),
                _ => Some(Action::PromptInput(key)),
            },
            _ => None,
        },
        AppMode::Help => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => Some(Action::ToggleHelp),
                _ => None,
            },
            _ => None,
        },
        AppMode::Editing => match event {
            Event::Key(key) => {
                // The open palette claims navigation keys before anything else.
                if app_state.slash.is_open() {
                    if let Some(palette_key) = PaletteKey::from_key_event(&key) {
                        return Some(Action::SlashKey(palette_key));
                    }
                }
                if let Some(action) = app_state.keymap.get_action(key) {
                    return Some(action);
                }
                Some(Action::EditorInput(key))
            }
            Event::Paste(text) => Some(Action::Paste(text)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if app_state.slash.is_open() => {
                    let area = app_state.palette_area?;
                    resolve_palette_click(area, mouse.column, mouse.row)
                        .map(|row| Action::SlashActivate(row + app_state.palette_offset))
                }
                _ => None,
            },
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::update;
    use crate::app::state::ErrorSeverity;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn open_palette(state: &mut AppState) {
        for c in "/h".chars() {
            update(
                state,
                Action::EditorInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        assert!(state.slash.is_open());
    }

    #[test]
    fn test_palette_claims_navigation_only_when_open() {
        let mut state = AppState::default();
        assert!(matches!(
            map_event_to_action(key(KeyCode::Down), &state),
            Some(Action::EditorInput(_))
        ));

        open_palette(&mut state);
        assert_eq!(
            map_event_to_action(key(KeyCode::Down), &state),
            Some(Action::SlashKey(PaletteKey::Down))
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc), &state),
            Some(Action::SlashKey(PaletteKey::Escape))
        );
        assert!(matches!(
            map_event_to_action(key(KeyCode::Char('1')), &state),
            Some(Action::EditorInput(_))
        ));
    }

    #[test]
    fn test_shortcuts_and_quit() {
        let state = AppState::default();
        let ctrl_s = Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(map_event_to_action(ctrl_s, &state), Some(Action::SaveIntent));

        let ctrl_q = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert_eq!(map_event_to_action(ctrl_q, &state), Some(Action::Quit));
    }

    #[test]
    fn test_error_modal_swallows_keys() {
        let mut state = AppState::default();
        state.last_error = Some(crate::app::state::ErrorState::new(
            "boom",
            ErrorSeverity::Error,
        ));
        assert_eq!(map_event_to_action(key(KeyCode::Char('a')), &state), None);
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc), &state),
            Some(Action::DismissError)
        );
    }

    #[test]
    fn test_prompt_mode_keys() {
        let mut state = AppState::default();
        update(&mut state, Action::OpenIntent);
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state),
            Some(Action::PromptSubmit)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc), &state),
            Some(Action::CancelMode)
        );
        assert!(matches!(
            map_event_to_action(key(KeyCode::Char('/')), &state),
            Some(Action::PromptInput(_))
        ));
    }

    #[test]
    fn test_paste_and_palette_click() {
        let mut state = AppState::default();
        assert_eq!(
            map_event_to_action(Event::Paste("hi".to_string()), &state),
            Some(Action::Paste("hi".to_string()))
        );

        open_palette(&mut state);
        state.palette_area = Some(Rect::new(2, 3, 30, 5));
        let click = |column, row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            map_event_to_action(click(5, 5), &state),
            Some(Action::SlashActivate(1))
        );
        assert_eq!(map_event_to_action(click(5, 3), &state), None);
        assert_eq!(map_event_to_action(click(40, 5), &state), None);
    }
}
