use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const SEP_RIGHT: &str = "\u{e0b0}";

pub struct Header<'a> {
    pub theme: &'a Theme,
    pub file_name: Option<&'a str>,
    pub is_dirty: bool,
    pub word_count: usize,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Separator fg is the segment it closes, bg the one it opens.
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let file_bg = self.theme.header_file.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);
        let sep_logo_file = Style::default().fg(logo_bg).bg(file_bg);
        let sep_file_base = Style::default().fg(file_bg).bg(base_bg);

        let name = self.file_name.unwrap_or("untitled");
        let mut spans = vec![
            Span::styled(" MEDWRITE ", self.theme.header_logo),
            Span::styled(SEP_RIGHT, sep_logo_file),
            Span::styled(format!(" {name} "), self.theme.header_file),
            Span::styled(SEP_RIGHT, sep_file_base),
        ];
        if self.is_dirty {
            spans.push(Span::styled(" ● modified ", self.theme.header_dirty));
        }

        let words = format!(
            " {} word{} ",
            self.word_count,
            if self.word_count == 1 { "" } else { "s" }
        );
        let used: usize = spans.iter().map(Span::width).sum();
        let padding = usize::from(area.width).saturating_sub(used + words.chars().count());
        spans.push(Span::styled(" ".repeat(padding), self.theme.header));
        spans.push(Span::styled(words, self.theme.header_item));

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
