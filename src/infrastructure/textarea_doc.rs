use crate::domain::document::{
    DocumentEngine, DocumentEvent, Listeners, Subscription, SubscriptionId,
};
use crate::domain::models::{Format, ImageData};
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use tui_textarea::{CursorMove, TextArea};

pub const PLACEHOLDER: &str = "Start writing... Type / for commands";

const FENCE: &str = "```";
const QUOTE_PREFIX: &str = "> ";

/// Markdown source held in a `tui_textarea::TextArea`. Formatting edits the
/// markup directly.
pub struct TextAreaDocument<'a> {
    area: TextArea<'a>,
    listeners: Listeners,
}

impl Default for TextAreaDocument<'_> {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl TextAreaDocument<'_> {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        let mut area = TextArea::new(lines);
        area.set_placeholder_text(PLACEHOLDER);
        area.set_cursor_line_style(Style::default());
        Self {
            area,
            listeners: Listeners::default(),
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.area.lines().join("\n")
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.area.lines()
    }

    /// `(row, col)` of the caret, columns in characters.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        self.area.cursor()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.area.lines().iter().all(String::is_empty)
    }

    pub fn apply_theme(&mut self, theme: &Theme) {
        self.area.set_style(theme.editor_text);
        self.area.set_placeholder_style(theme.dimmed);
        self.area.set_cursor_style(theme.editor_cursor);
    }

    /// Default editing behaviour for a key the palette did not consume.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let before = self.area.cursor();
        let modified = self.area.input(key);
        if modified {
            self.listeners.notify(DocumentEvent::Changed);
        } else if self.area.cursor() != before {
            self.listeners.notify(DocumentEvent::SelectionChanged);
        }
        modified
    }

    pub fn insert_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        if normalized.is_empty() {
            return;
        }
        self.area.cancel_selection();
        self.area.insert_str(normalized);
        self.listeners.notify(DocumentEvent::Changed);
    }

    fn line_len(&self, row: usize) -> usize {
        self.area.lines().get(row).map_or(0, |l| l.chars().count())
    }

    fn offset_of(&self, row: usize, col: usize) -> usize {
        let before: usize = self.area.lines()[..row]
            .iter()
            .map(|l| l.chars().count() + 1)
            .sum();
        before + col
    }

    fn position_of(&self, offset: usize) -> (usize, usize) {
        let lines = self.area.lines();
        let mut remaining = offset;
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return (row, remaining);
            }
            remaining -= len + 1;
        }
        let last = lines.len().saturating_sub(1);
        (last, self.line_len(last))
    }

    /// Moves the caret to `(row, col)`, returning whether it got there.
    fn jump(&mut self, row: usize, col: usize) -> bool {
        if let (Ok(r), Ok(c)) = (u16::try_from(row), u16::try_from(col)) {
            self.area.move_cursor(CursorMove::Jump(r, c));
        } else {
            // Jump only takes u16 coordinates; step there instead.
            let (current, _) = self.area.cursor();
            for _ in current..row {
                self.area.move_cursor(CursorMove::Down);
            }
            for _ in row..current {
                self.area.move_cursor(CursorMove::Up);
            }
            if col >= self.line_len(row) {
                self.area.move_cursor(CursorMove::End);
            } else {
                self.area.move_cursor(CursorMove::Head);
                for _ in 0..col {
                    self.area.move_cursor(CursorMove::Forward);
                }
            }
        }
        self.area.cursor() == (row, col)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Replaces `[start, end)` with `text`, leaving the caret after it.
    /// Nothing is edited if the caret cannot reach `start`.
    fn splice(&mut self, start: usize, end: usize, text: &str) -> bool {
        let (row, col) = self.position_of(start);
        self.area.cancel_selection();
        if !self.jump(row, col) {
            tracing::warn!(row, col, "edit position unreachable, skipping edit");
            return false;
        }
        if end > start {
            self.area.delete_str(end - start);
        }
        if !text.is_empty() {
            self.area.insert_str(text);
        }
        true
    }

    fn toggle_inline(&mut self, marker: &str) {
        let width = marker.chars().count();
        match self.area.selection_range() {
            Some(((start_row, start_col), (end_row, end_col))) => {
                let start = self.offset_of(start_row, start_col);
                let end = self.offset_of(end_row, end_col);
                let selected = self.slice(start, end);
                let len = selected.chars().count();
                let replacement = if len >= 2 * width
                    && selected.starts_with(marker)
                    && selected.ends_with(marker)
                {
                    selected.chars().skip(width).take(len - 2 * width).collect()
                } else {
                    format!("{marker}{selected}{marker}")
                };
                self.splice(start, end, &replacement);
            }
            None => {
                let caret = self.caret();
                self.splice(caret, caret, &format!("{marker}{marker}"));
                let (row, col) = self.position_of(caret + width);
                self.jump(row, col);
            }
        }
    }

    fn toggle_heading(&mut self, level: u8) {
        let (row, col) = self.area.cursor();
        let existing = heading_prefix(&self.area.lines()[row]);
        let old_len = existing.map_or(0, |(_, len)| len);
        let new_prefix = if existing.map(|(l, _)| l) == Some(level) {
            String::new()
        } else {
            format!("{} ", "#".repeat(usize::from(level.clamp(1, 6))))
        };

        let line_start = self.offset_of(row, 0);
        self.splice(line_start, line_start + old_len, &new_prefix);
        let new_len = new_prefix.chars().count();
        self.jump(row, col.saturating_sub(old_len) + new_len);
    }

    fn toggle_line_prefix(&mut self, prefix: &str) {
        let (row, col) = self.area.cursor();
        let width = prefix.chars().count();
        let line_start = self.offset_of(row, 0);
        if self.area.lines()[row].starts_with(prefix) {
            self.splice(line_start, line_start + width, "");
            self.jump(row, col.saturating_sub(width));
        } else {
            self.splice(line_start, line_start, prefix);
            self.jump(row, col + width);
        }
    }

    fn toggle_code_block(&mut self) {
        let (row, col) = self.area.cursor();
        let lines = self.area.lines();
        let fenced = row > 0
            && row + 1 < lines.len()
            && is_fence(&lines[row - 1])
            && is_fence(&lines[row + 1]);

        if fenced {
            // Bottom fence first so the top offsets stay valid.
            let bottom_start = self.offset_of(row, self.line_len(row));
            let bottom_end = self.offset_of(row + 1, self.line_len(row + 1));
            self.splice(bottom_start, bottom_end, "");
            let top_start = self.offset_of(row - 1, 0);
            self.splice(top_start, top_start + self.line_len(row - 1) + 1, "");
            self.jump(row - 1, col);
        } else {
            let line_end = self.offset_of(row, self.line_len(row));
            self.splice(line_end, line_end, &format!("\n{FENCE}"));
            let line_start = self.offset_of(row, 0);
            self.splice(line_start, line_start, &format!("{FENCE}\n"));
            self.jump(row + 1, col);
        }
    }
}

fn heading_prefix(line: &str) -> Option<(u8, usize)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) && line[hashes..].starts_with(' ') {
        u8::try_from(hashes).ok().map(|level| (level, hashes + 1))
    } else {
        None
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

impl DocumentEngine for TextAreaDocument<'_> {
    fn text_before_caret(&self, max_chars: usize) -> String {
        let (row, col) = self.area.cursor();
        let lines = self.area.lines();
        let mut segments: Vec<String> = Vec::new();
        let mut remaining = max_chars;
        let mut current_row = row;
        let mut upto = col;

        loop {
            let head: Vec<char> = lines[current_row].chars().take(upto).collect();
            let take = head.len().min(remaining);
            segments.push(head[head.len() - take..].iter().collect());
            remaining -= take;
            if remaining == 0 || current_row == 0 {
                break;
            }
            segments.push("\n".to_string());
            remaining -= 1;
            if remaining == 0 {
                break;
            }
            current_row -= 1;
            upto = usize::MAX;
        }

        segments.reverse();
        segments.concat()
    }

    fn caret(&self) -> usize {
        let (row, col) = self.area.cursor();
        self.offset_of(row, col)
    }

    fn set_caret(&mut self, offset: usize) {
        let before = self.area.cursor();
        let (row, col) = self.position_of(offset);
        self.jump(row, col);
        if self.area.cursor() != before {
            self.listeners.notify(DocumentEvent::SelectionChanged);
        }
    }

    fn delete_range(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        if self.splice(start, end, "") {
            self.listeners.notify(DocumentEvent::Changed);
        }
    }

    fn apply_format(&mut self, format: Format) {
        match format {
            Format::Heading(level) => self.toggle_heading(level),
            Format::Blockquote => self.toggle_line_prefix(QUOTE_PREFIX),
            Format::CodeBlock => self.toggle_code_block(),
            Format::Bold | Format::Italic | Format::Strike | Format::InlineCode => {
                if let Some(marker) = format.marker() {
                    self.toggle_inline(marker);
                }
            }
        }
        self.listeners.notify(DocumentEvent::Changed);
    }

    fn insert_image(&mut self, image: &ImageData) {
        self.area.cancel_selection();
        self.area.insert_str(image.to_markdown());
        self.listeners.notify(DocumentEvent::Changed);
    }

    fn subscribe(&self) -> Subscription {
        self.listeners.subscribe()
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

impl Widget for &TextAreaDocument<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.area, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slash::{KeyDisposition, PaletteKey, SlashMenu, SlashOutcome};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn type_str(doc: &mut TextAreaDocument, s: &str) {
        for c in s.chars() {
            let key = if c == '\n' {
                KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
            } else {
                KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
            };
            doc.input(key);
        }
    }

    fn doc_at_end(text: &str) -> TextAreaDocument<'static> {
        let mut doc = TextAreaDocument::from_text(text);
        let len = text.chars().count();
        doc.set_caret(len);
        doc
    }

    #[test]
    fn test_offsets_count_newlines() {
        let mut doc = TextAreaDocument::from_text("ab\ncd\n\nef");
        doc.set_caret(4);
        assert_eq!(doc.cursor(), (1, 1));
        assert_eq!(doc.caret(), 4);

        doc.set_caret(6);
        assert_eq!(doc.cursor(), (2, 0));
        doc.set_caret(100);
        assert_eq!(doc.cursor(), (3, 2));
        assert_eq!(doc.caret(), 9);
    }

    #[test]
    fn test_window_spans_lines_and_is_bounded() {
        let doc = doc_at_end("first\nsecond /h");
        assert_eq!(doc.text_before_caret(50), "first\nsecond /h");
        assert_eq!(doc.text_before_caret(4), "d /h");
        assert_eq!(doc.text_before_caret(10), "\nsecond /h");
        assert_eq!(doc.text_before_caret(0), "");
    }

    #[test]
    fn test_window_stops_at_caret() {
        let mut doc = TextAreaDocument::from_text("/bold tail");
        doc.set_caret(5);
        assert_eq!(doc.text_before_caret(50), "/bold");
    }

    #[test]
    fn test_delete_range_across_lines() {
        let mut doc = doc_at_end("ab\ncd");
        doc.delete_range(1, 4);
        assert_eq!(doc.text(), "ad");
        doc.delete_range(1, 1);
        assert_eq!(doc.text(), "ad");
    }

    #[test]
    fn test_heading_toggles_and_replaces_level() {
        let mut doc = doc_at_end("Title");
        doc.apply_format(Format::Heading(2));
        assert_eq!(doc.text(), "## Title");
        assert_eq!(doc.cursor(), (0, 8));

        doc.apply_format(Format::Heading(1));
        assert_eq!(doc.text(), "# Title");

        doc.apply_format(Format::Heading(1));
        assert_eq!(doc.text(), "Title");
        assert_eq!(doc.cursor(), (0, 5));
    }

    #[test]
    fn test_blockquote_toggle() {
        let mut doc = doc_at_end("quoted");
        doc.apply_format(Format::Blockquote);
        assert_eq!(doc.text(), "> quoted");
        doc.apply_format(Format::Blockquote);
        assert_eq!(doc.text(), "quoted");
    }

    #[test]
    fn test_code_block_wraps_and_unwraps_line() {
        let mut doc = doc_at_end("before\nlet x = 1;");
        doc.apply_format(Format::CodeBlock);
        assert_eq!(doc.text(), "before\n```\nlet x = 1;\n```");
        assert_eq!(doc.cursor().0, 2);

        doc.apply_format(Format::CodeBlock);
        assert_eq!(doc.text(), "before\nlet x = 1;");
        assert_eq!(doc.cursor().0, 1);
    }

    #[test]
    fn test_inline_mark_without_selection_inserts_pair() {
        let mut doc = doc_at_end("say ");
        doc.apply_format(Format::Bold);
        assert_eq!(doc.text(), "say ****");
        assert_eq!(doc.caret(), 6);
        type_str(&mut doc, "hi");
        assert_eq!(doc.text(), "say **hi**");
    }

    #[test]
    fn test_insert_image_at_caret() {
        let mut doc = doc_at_end("see: ");
        doc.insert_image(&ImageData {
            name: "a.gif".to_string(),
            mime: "image/gif",
            bytes: vec![1, 2, 3],
        });
        assert_eq!(doc.text(), "see: ![a.gif](data:image/gif;base64,AQID)");
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut doc = TextAreaDocument::default();
        doc.insert_text("a\r\nb\rc");
        assert_eq!(doc.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn test_input_notifies_listeners() {
        let mut doc = doc_at_end("x");
        let mut sub = doc.subscribe();

        type_str(&mut doc, "y");
        doc.input(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        doc.input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        assert_eq!(
            sub.drain(),
            vec![DocumentEvent::Changed, DocumentEvent::SelectionChanged]
        );
    }

    #[test]
    fn test_slash_h2_scenario() {
        let mut doc = TextAreaDocument::default();
        let mut menu = SlashMenu::attach(&doc);

        type_str(&mut doc, "/h");
        menu.sync(&doc);
        let visible: Vec<_> = menu.visible().map(|(c, _)| c.trigger).collect();
        assert_eq!(visible, ["/h1", "/h2", "/h3"]);

        menu.handle_key(PaletteKey::Down, &mut doc);
        let disposition = menu.handle_key(PaletteKey::Enter, &mut doc);

        assert_eq!(
            disposition,
            KeyDisposition::Executed(SlashOutcome::Applied("/h2"))
        );
        assert_eq!(doc.text(), "## ");
        assert!(!menu.is_open());
    }

    #[test]
    fn test_slash_escape_scenario_keeps_text() {
        let mut doc = doc_at_end("note ");
        let mut menu = SlashMenu::attach(&doc);

        type_str(&mut doc, "/h");
        menu.sync(&doc);
        assert!(menu.is_open());

        menu.handle_key(PaletteKey::Escape, &mut doc);
        assert!(!menu.is_open());
        assert_eq!(doc.text(), "note /h");
    }

    #[test]
    fn test_slash_command_on_row_past_u16_range() {
        let mut text: String = (0..70_000).map(|i| format!("L{i}\n")).collect();
        text.push_str("tail ");
        let mut doc = doc_at_end(&text);
        assert_eq!(doc.cursor(), (70_000, 5));
        let mut menu = SlashMenu::attach(&doc);

        type_str(&mut doc, "/h");
        menu.sync(&doc);
        assert_eq!(
            menu.handle_key(PaletteKey::Enter, &mut doc),
            KeyDisposition::Executed(SlashOutcome::Applied("/h1"))
        );
        assert_eq!(doc.lines()[70_000], "# tail ");
        assert_eq!(doc.lines()[65_535], "L65535");
        assert_eq!(doc.lines().len(), 70_001);
        assert_eq!(doc.cursor(), (70_000, 7));
    }

    #[test]
    fn test_delete_on_column_past_u16_range() {
        let long = "x".repeat(70_000);
        let mut doc = doc_at_end(&format!("{long}ab"));
        assert_eq!(doc.cursor(), (0, 70_002));

        doc.delete_range(70_000, 70_001);
        assert_eq!(doc.text(), format!("{long}b"));
        assert_eq!(doc.cursor(), (0, 70_000));

        doc.set_caret(3);
        assert_eq!(doc.cursor(), (0, 3));
    }

    #[test]
    fn test_heading_prefix_parsing() {
        assert_eq!(heading_prefix("### x"), Some((3, 4)));
        assert_eq!(heading_prefix("#x"), None);
        assert_eq!(heading_prefix("####### x"), None);
        assert_eq!(heading_prefix("plain"), None);
    }
}
