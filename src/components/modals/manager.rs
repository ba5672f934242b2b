use crate::app::state::{AppMode, AppState};
use crate::slash::catalog;
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::error::ErrorModal;
use super::help::HelpModal;
use super::helpers::dim_area;
use super::prompt::PromptModal;

/// Draws whichever overlays the current mode calls for, over a dimmed editor.
pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl ModalManager<'_> {
    #[must_use]
    pub fn is_active(state: &AppState) -> bool {
        state.mode != AppMode::Editing || state.last_error.is_some()
    }
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !Self::is_active(self.app_state) {
            return;
        }
        dim_area(buf, area);

        match self.app_state.mode {
            AppMode::Help => HelpModal {
                theme: self.theme,
                keymap: &self.app_state.keymap,
                commands: catalog(),
            }
            .render(area, buf),
            AppMode::Prompt => {
                if let Some(prompt) = &self.app_state.prompt {
                    PromptModal {
                        theme: self.theme,
                        prompt,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Editing => {}
        }

        // Errors stack above everything else.
        if let Some(error) = &self.app_state.last_error {
            ErrorModal {
                theme: self.theme,
                error,
            }
            .render(area, buf);
        }
    }
}
