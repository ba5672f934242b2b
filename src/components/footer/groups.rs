use super::types::{FooterGroup, FooterItem};
use crate::app::action::Action;
use crate::app::state::{AppMode, AppState};
use crate::domain::models::Format;

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup {
            name: "ERROR",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    match state.mode {
        AppMode::Prompt => vec![FooterGroup {
            name: "PROMPT",
            items: vec![
                FooterItem::new("Enter", "confirm"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::Help => vec![FooterGroup {
            name: "HELP",
            items: vec![FooterItem::new("Esc", "close")],
        }],
        AppMode::Editing if state.slash.is_open() => vec![FooterGroup {
            name: "COMMANDS",
            items: vec![
                FooterItem::new("↑/↓", "select"),
                FooterItem::new("Enter", "apply"),
                FooterItem::new("Esc", "close"),
            ],
        }],
        AppMode::Editing => {
            let bound = |action: Action, desc: &'static str| {
                state
                    .keymap
                    .binding_for(&action)
                    .map(|key| FooterItem::new(key, desc))
            };
            let file = [
                bound(Action::SaveIntent, "save").map(|i| i.highlighted(state.is_dirty)),
                bound(Action::OpenIntent, "open"),
                bound(Action::Quit, "quit").map(|i| i.highlighted(state.quit_armed)),
            ];
            let format = [
                bound(Action::ApplyFormat(Format::Bold), "bold"),
                bound(Action::ApplyFormat(Format::Italic), "ital"),
                Some(FooterItem::new("/", "cmds")),
            ];
            let view = [
                bound(Action::ToggleFocusMode, "focus"),
                bound(Action::ToggleHelp, "help"),
            ];
            vec![
                FooterGroup {
                    name: "FILE",
                    items: file.into_iter().flatten().collect(),
                },
                FooterGroup {
                    name: "FORMAT",
                    items: format.into_iter().flatten().collect(),
                },
                FooterGroup {
                    name: "VIEW",
                    items: view.into_iter().flatten().collect(),
                },
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::update;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_editing_groups_use_current_bindings() {
        let state = AppState::default();
        let groups = get_groups(&state);
        assert_eq!(groups[0].name, "FILE");
        assert_eq!(groups[0].items[0].key, "Ctrl+S");
        assert!(!groups[0].items[0].highlighted);
    }

    #[test]
    fn test_open_palette_swaps_hints() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::EditorInput(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE)),
        );
        let groups = get_groups(&state);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "COMMANDS");
    }
}
