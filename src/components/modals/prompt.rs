use crate::app::state::PromptState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

/// Path prompt: the input line with a hint underneath.
pub struct PromptModal<'a> {
    pub theme: &'a Theme,
    pub prompt: &'a PromptState<'a>,
}

impl Widget for PromptModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, 4, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.prompt.kind.title(), self.theme.highlight),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("Enter", self.theme.footer_segment_key),
                Span::raw(": confirm "),
                Span::styled("Esc", self.theme.footer_segment_key),
                Span::raw(": cancel "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);
        if inner_area.width == 0 || inner_area.height == 0 {
            return;
        }

        let input_area = Rect {
            height: 1,
            ..inner_area
        };
        Widget::render(&self.prompt.text_area, input_area, buf);

        if inner_area.height > 1 {
            let hint = Line::from(Span::styled(self.prompt.kind.hint(), self.theme.dimmed));
            buf.set_line(inner_area.x, inner_area.y + 1, &hint, inner_area.width);
        }
    }
}
