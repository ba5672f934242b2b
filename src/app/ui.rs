use crate::app::state::{AppMode, AppState};
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::ModalManager;
use crate::components::slash_palette::{popup_rect, SlashPalette, MAX_VISIBLE};

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding},
    Frame,
};

/// Text column width in focus mode.
const FOCUS_WIDTH: u16 = 88;

pub struct AppLayout {
    pub header: Rect,
    pub editor: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect, focus_mode: bool) -> AppLayout {
    if focus_mode {
        let width = area.width.min(FOCUS_WIDTH);
        let editor = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        return AppLayout {
            header: Rect::default(),
            editor,
            footer: Rect::default(),
        };
    }

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Editor
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        editor: main[1],
        footer: main[2],
    }
}

/// Scrolls the viewport as little as possible to keep the cursor visible.
pub fn follow_cursor(scroll: (u16, u16), cursor: (usize, usize), viewport: Rect) -> (u16, u16) {
    fn axis(top: u16, pos: usize, len: u16) -> u16 {
        let (top, len) = (usize::from(top), usize::from(len));
        let next = if len == 0 || pos < top {
            pos
        } else if pos >= top + len {
            pos + 1 - len
        } else {
            top
        };
        u16::try_from(next).unwrap_or(u16::MAX)
    }
    (
        axis(scroll.0, cursor.0, viewport.height),
        axis(scroll.1, cursor.1, viewport.width),
    )
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let theme = app_state.theme.clone();
    let layout = get_layout(area, app_state.focus_mode);

    // --- Header ---
    if !app_state.focus_mode && layout.header.height > 0 {
        let file_name = app_state.file_name();
        let header = Header {
            theme: &theme,
            file_name: file_name.as_deref(),
            is_dirty: app_state.is_dirty,
            word_count: app_state.document.text().split_whitespace().count(),
        };
        f.render_widget(header, layout.header);
    }

    // --- Editor ---
    let editor_block = if app_state.focus_mode {
        Block::default()
            .padding(Padding::new(2, 2, 1, 1))
            .style(theme.editor_background)
    } else {
        let border_style = if ModalManager::is_active(app_state) {
            theme.border
        } else {
            theme.border_focus
        };
        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("NOTE", theme.header_item),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .style(theme.editor_background)
    };
    let editor_area = editor_block.inner(layout.editor);
    f.render_widget(editor_block, layout.editor);
    if editor_area.width > 0 && editor_area.height > 0 {
        f.render_widget(&app_state.document, editor_area);
    }
    app_state.editor_scroll = follow_cursor(
        app_state.editor_scroll,
        app_state.document.cursor(),
        editor_area,
    );

    // --- Slash palette ---
    draw_palette(f, app_state, editor_area);

    // --- Footer ---
    if !app_state.focus_mode && layout.footer.height > 0 {
        let footer = Footer {
            state: app_state,
            theme: &theme,
        };
        f.render_widget(footer, layout.footer);
    }

    // --- Modals ---
    let modals = ModalManager {
        theme: &theme,
        app_state,
    };
    f.render_widget(modals, area);
}

fn draw_palette(f: &mut Frame, app_state: &mut AppState, editor_area: Rect) {
    let showing = app_state.mode == AppMode::Editing
        && app_state.last_error.is_none()
        && app_state.slash.is_open()
        && editor_area.width > 0
        && editor_area.height > 0;
    if !showing {
        app_state.palette_area = None;
        app_state.palette_offset = 0;
        return;
    }

    let (row, col) = app_state.document.cursor();
    let (top, left) = app_state.editor_scroll;
    let to_screen = |pos: usize, start: u16, origin: u16, len: u16| {
        let rel = u16::try_from(pos).unwrap_or(u16::MAX).saturating_sub(start);
        origin + rel.min(len.saturating_sub(1))
    };
    let anchor = Position::new(
        to_screen(col, left, editor_area.x, editor_area.width),
        to_screen(row, top, editor_area.y, editor_area.height),
    );

    let palette = SlashPalette {
        theme: &app_state.theme,
        items: app_state.slash.visible().collect(),
        offset: 0,
    };
    let rows = palette.items.len().min(MAX_VISIBLE);
    let height = u16::try_from(rows + 2).unwrap_or(u16::MAX);
    let rect = popup_rect(anchor, palette.desired_width(), height, f.area());

    let selected = app_state.slash.state().selected().unwrap_or(0);
    let offset = SlashPalette::scroll_for(
        selected,
        app_state.palette_offset,
        usize::from(rect.height.saturating_sub(2)),
    );
    f.render_widget(SlashPalette { offset, ..palette }, rect);

    app_state.palette_area = Some(rect);
    app_state.palette_offset = offset;
}
