use crate::app::action::Action;
use crate::app::keymap::KeyMap;
use crate::domain::models::Format;
use crate::slash::SlashCommand;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

fn shortcuts() -> Vec<(&'static str, Vec<(Action, &'static str)>)> {
    vec![
        (
            "File",
            vec![
                (Action::SaveIntent, "Save note"),
                (Action::SaveAsIntent, "Save note as..."),
                (Action::OpenIntent, "Open note"),
                (Action::InsertImageIntent, "Insert image from path"),
                (Action::Quit, "Quit (twice when unsaved)"),
            ],
        ),
        (
            "Formatting",
            vec![
                (Action::ApplyFormat(Format::Bold), "Bold"),
                (Action::ApplyFormat(Format::Italic), "Italic"),
                (Action::ApplyFormat(Format::Strike), "Strikethrough"),
                (Action::ApplyFormat(Format::InlineCode), "Inline code"),
                (Action::ApplyFormat(Format::Heading(1)), "Heading 1"),
                (Action::ApplyFormat(Format::Heading(2)), "Heading 2"),
                (Action::ApplyFormat(Format::Heading(3)), "Heading 3"),
                (Action::ApplyFormat(Format::Blockquote), "Blockquote"),
                (Action::ApplyFormat(Format::CodeBlock), "Code block"),
            ],
        ),
        (
            "View",
            vec![
                (Action::ToggleFocusMode, "Focus mode"),
                (Action::CycleTheme, "Next theme"),
                (Action::ToggleHelp, "Show this help"),
            ],
        ),
    ]
}

const PALETTE_KEYS: &[(&str, &str)] = &[
    (" ↑ / ↓", "Move selection"),
    (" Enter", "Run selected command"),
    (" Esc", "Close until the next edit"),
    (" Click", "Run clicked command"),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
    pub keymap: &'a KeyMap,
    pub commands: &'a [SlashCommand],
}

impl HelpModal<'_> {
    fn rows(&self) -> Vec<Row<'static>> {
        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;
        let category = |name: &'static str| {
            Row::new(vec![
                Cell::from(Span::styled(name, category_style)),
                Cell::from(""),
            ])
        };
        let entry = |key: String, desc: String| {
            Row::new(vec![
                Cell::from(Span::styled(key, key_style)),
                Cell::from(Span::styled(desc, desc_style)),
            ])
        };

        let mut rows = Vec::new();
        for (name, items) in shortcuts() {
            rows.push(category(name));
            for (action, desc) in items {
                // Unbound actions are left out rather than shown blank.
                if let Some(key) = self.keymap.binding_for(&action) {
                    rows.push(entry(format!(" {key}"), desc.to_string()));
                }
            }
            rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
        }

        rows.push(category("Slash commands"));
        for cmd in self.commands {
            rows.push(entry(
                format!(" {}", cmd.trigger),
                cmd.description.to_string(),
            ));
        }
        rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));

        rows.push(category("Command palette"));
        for (key, desc) in PALETTE_KEYS {
            rows.push(entry((*key).to_string(), (*desc).to_string()));
        }
        rows
    }
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYBINDINGS ", self.theme.highlight),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("Esc", self.theme.footer_segment_key),
                Span::raw(": close "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let table = Table::new(
            self.rows(),
            [Constraint::Percentage(30), Constraint::Percentage(70)],
        )
        .block(block);

        Widget::render(table, help_area, buf);
    }
}
