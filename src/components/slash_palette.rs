use crate::slash::SlashCommand;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

pub const MAX_VISIBLE: usize = 8;

/// Floating list of matching slash commands, drawn next to the caret.
pub struct SlashPalette<'a> {
    pub theme: &'a Theme,
    pub items: Vec<(&'static SlashCommand, bool)>,
    pub offset: usize,
}

impl SlashPalette<'_> {
    /// Width needed to show every item on one line, border included.
    #[must_use]
    pub fn desired_width(&self) -> u16 {
        let widest = self
            .items
            .iter()
            .map(|(cmd, _)| cmd.trigger.chars().count() + cmd.description.chars().count() + 5)
            .max()
            .unwrap_or(0);
        u16::try_from(widest + 2).unwrap_or(u16::MAX)
    }

    /// Keeps the selected row inside a window of `rows` items.
    #[must_use]
    pub fn scroll_for(selected: usize, current: usize, rows: usize) -> usize {
        if rows == 0 {
            return 0;
        }
        if selected < current {
            selected
        } else if selected >= current + rows {
            selected + 1 - rows
        } else {
            current
        }
    }
}

/// Places a popup of `width` x `height` just below `anchor`, or above it when
/// the bottom of `bounds` is too close. Shifted left to stay on screen.
#[must_use]
pub fn popup_rect(anchor: Position, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = anchor.y.saturating_add(1);
    let y = if below + height <= bounds.bottom() {
        below
    } else if anchor.y >= bounds.y + height {
        anchor.y - height
    } else {
        bounds.bottom().saturating_sub(height).max(bounds.y)
    };

    let x = anchor
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);

    Rect::new(x, y, width, height)
}

impl Widget for SlashPalette<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        Clear.render(area, buf);

        let block = Block::default()
            .title(Line::from(Span::styled(" Commands ", self.theme.palette_trigger)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.palette_border)
            .style(self.theme.palette_item);
        let inner = block.inner(area);
        block.render(area, buf);

        let trigger_width = self
            .items
            .iter()
            .map(|(cmd, _)| cmd.trigger.chars().count())
            .max()
            .unwrap_or(0);

        for (row, (cmd, selected)) in self
            .items
            .iter()
            .skip(self.offset)
            .take(usize::from(inner.height))
            .enumerate()
        {
            let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
            let (marker, trigger_style, desc_style) = if *selected {
                (
                    "› ",
                    self.theme.palette_selected,
                    self.theme.palette_selected,
                )
            } else {
                (
                    "  ",
                    self.theme.palette_trigger,
                    self.theme.palette_description,
                )
            };
            if *selected {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), self.theme.palette_selected);
            }
            let line = Line::from(vec![
                Span::styled(marker, trigger_style),
                Span::styled(format!("{:<trigger_width$}", cmd.trigger), trigger_style),
                Span::raw("  "),
                Span::styled(cmd.description, desc_style),
            ]);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
