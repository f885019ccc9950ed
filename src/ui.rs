use crate::{
    app::App,
    colors::*,
    metadata::EntryMetadata,
    utils::{expand_tabs, render_size},
};
use std::ops::Range;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

pub const APP_NAME: &str = "put";
pub const MODULE_TITLE: &str = "File Functions";

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Module line
            Constraint::Length(1), // Path
            Constraint::Length(1), // Column titles
            Constraint::Min(0),    // List
            Constraint::Length(3), // Stats
            Constraint::Length(4), // Menu
        ])
        .split(f.area());

    let [title_area, module_area, path_area, columns_area, list_area, stats_area, menu_area] =
        *chunks
    else {
        return;
    };

    render_header(f, app, title_area, module_area, path_area, columns_area);
    render_file_list(f, app, list_area);
    render_stats(f, app, stats_area);
    render_menu(f, app, menu_area);

    if app.show_help {
        render_help_overlay(f);
    }
}

fn main_style() -> Style {
    Style::default().fg(COLOR_MAIN_FG).bg(COLOR_MAIN_BG)
}

fn render_header(
    f: &mut Frame,
    app: &App,
    title_area: Rect,
    module_area: Rect,
    path_area: Rect,
    columns_area: Rect,
) {
    let title = Paragraph::new(format!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION")))
        .style(main_style());
    f.render_widget(title, title_area);

    let width = module_area.width as usize;
    let side = width.saturating_sub(MODULE_TITLE.len()) / 2;
    let module_line = format!(
        "{}{}{}",
        "─".repeat(side),
        MODULE_TITLE,
        "─".repeat(width.saturating_sub(side + MODULE_TITLE.len()))
    );
    f.render_widget(Paragraph::new(module_line).style(main_style()), module_area);

    let path = Paragraph::new(format!("Path={}", app.model.working_dir().display()))
        .style(Style::default().fg(COLOR_FILE).bg(COLOR_BODY_BG));
    f.render_widget(path, path_area);

    let columns = expand_tabs(
        "Name\t      Size  Last Modified",
        app.model.max_name_len() + 2,
    );
    let columns = Paragraph::new(columns).style(
        Style::default()
            .fg(COLOR_TITLE)
            .bg(COLOR_COLUMNS_BG)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(columns, columns_area);
}

fn entry_style(meta: &EntryMetadata, selected: bool) -> Style {
    let style = Style::default().bg(COLOR_BODY_BG);
    match (meta.is_broken_link, meta.is_dir, selected) {
        (true, _, false) => style.fg(COLOR_BROKEN_LINK).bg(COLOR_BROKEN_LINK_BG),
        (true, _, true) => style.fg(COLOR_BROKEN_LINK_SEL).bg(COLOR_BROKEN_LINK_BG),
        (false, true, false) => style.fg(COLOR_DIRECTORY),
        (false, true, true) => style.fg(COLOR_DIRECTORY_SEL).add_modifier(Modifier::BOLD),
        (false, false, false) => style.fg(COLOR_FILE),
        (false, false, true) => style.fg(COLOR_FILE_SEL).add_modifier(Modifier::BOLD),
    }
}

/// Rows the list will draw, given the scroll offset before this frame.
///
/// Mirrors the list's own scrolling: the offset only moves far enough to
/// keep the focused row inside a window of `height` rows.
pub fn visible_range(offset: usize, focused: Option<usize>, height: usize, len: usize) -> Range<usize> {
    let mut start = offset.min(len.saturating_sub(1));
    if let Some(focused) = focused {
        if focused < start {
            start = focused;
        } else if height > 0 && focused >= start + height {
            start = focused + 1 - height;
        }
    }
    start..(start + height).min(len)
}

fn render_file_list(f: &mut Frame, app: &mut App, area: Rect) {
    let max_name_len = app.model.max_name_len();
    let visible = visible_range(
        app.state.offset(),
        app.state.selected(),
        area.height as usize,
        app.model.file_count(),
    );
    let items: Vec<ListItem> = app
        .model
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let selected = app.model.is_selected(idx);
            let marker = if selected { "*" } else { " " };
            let plain_row = || {
                format!(
                    "{}{}",
                    marker,
                    expand_tabs(&format!("{}\t", name.to_string_lossy()), max_name_len + 2)
                )
            };
            // Off-screen rows are never drawn, so they skip the stat
            if !visible.contains(&idx) {
                return ListItem::new(plain_row());
            }
            match app.model.entry_metadata(idx) {
                Ok(meta) => ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(meta.render(max_name_len)),
                ]))
                .style(entry_style(&meta, selected)),
                // Vanished since the last refresh
                Err(_) => ListItem::new(plain_row())
                    .style(Style::default().fg(COLOR_HELP_HINT).bg(COLOR_BODY_BG)),
            }
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().bg(COLOR_BODY_BG))
        .highlight_style(Style::default().bg(COLOR_FOCUS_BG));

    f.render_stateful_widget(list, area, &mut app.state);
}

fn stat_line(label: String, size: u64) -> Line<'static> {
    Line::from(format!("{:>24}{}", label, render_size(size)))
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let model = &app.model;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let [left_area, right_area] = *halves else {
        return;
    };

    let left = Paragraph::new(vec![
        stat_line(
            format!("{} files LISTed   = ", model.file_count()),
            model.total_size(),
        ),
        stat_line(
            format!("{} files SELECTed = ", model.selected_count()),
            model.selected_size(),
        ),
    ])
    .block(Block::default().borders(Borders::TOP | Borders::LEFT));
    let right = Paragraph::new(vec![
        stat_line(
            format!("{} files in sub-dir = ", model.file_count()),
            model.total_size(),
        ),
        stat_line("Available on volume = ".to_string(), model.disk_free()),
    ])
    .block(Block::default().borders(Borders::TOP | Borders::RIGHT));

    let style = Style::default().fg(COLOR_FILE).bg(COLOR_BODY_BG);
    f.render_widget(left.style(style), left_area);
    f.render_widget(right.style(style), right_area);
}

fn key(k: &'static str) -> Span<'static> {
    Span::styled(k, Style::default().fg(COLOR_KEY_FG).bg(COLOR_KEY_BG))
}

fn render_menu(f: &mut Frame, app: &App, area: Rect) {
    let menu = vec![
        Line::from(vec![
            key("D"),
            Span::raw("elete selected  "),
            key("E"),
            Span::raw("dit  "),
            key("R"),
            Span::raw("efresh  "),
            key("?"),
            Span::raw("=help"),
        ]),
        Line::from(vec![
            key("◄┘"),
            Span::raw("=SELECT  "),
            key("F1"),
            Span::raw("=UNselect  "),
            key("h"),
            Span::raw("/"),
            key("l"),
            Span::raw("=change dir  "),
            key("ESC"),
            Span::raw("="),
            key("Q"),
            Span::raw("uit"),
        ]),
    ];

    let mut block = Block::default().borders(Borders::ALL);
    if let Some(msg) = app.status_message.as_deref() {
        block = block
            .title_bottom(Line::from(format!(" {} ", msg)))
            .title_alignment(Alignment::Center);
    }

    let menu = Paragraph::new(menu)
        .alignment(Alignment::Center)
        .block(block)
        .style(main_style());
    f.render_widget(menu, area);
}

fn render_help_overlay(f: &mut Frame) {
    let header = |s: &'static str| {
        Line::from(Span::styled(
            s,
            Style::default()
                .fg(COLOR_HELP_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  put - File Functions",
            Style::default()
                .fg(COLOR_HELP_TITLE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        header("  Navigation:"),
        Line::from("    j / ↓           Move down"),
        Line::from("    k / ↑           Move up"),
        Line::from("    Ctrl+d / PgDn   Move down 10 items"),
        Line::from("    Ctrl+u / PgUp   Move up 10 items"),
        Line::from("    g / Home        Go to first item"),
        Line::from("    G / End         Go to last item"),
        Line::from("    l / →           Enter directory"),
        Line::from("    h / ← / Bksp    Go up one level"),
        Line::from(""),
        header("  Selection:"),
        Line::from("    Enter           Select entry"),
        Line::from("    F1              Unselect entry"),
        Line::from("    d               Delete selected files"),
        Line::from(""),
        header("  Other:"),
        Line::from("    e               Edit focused file"),
        Line::from("    r               Refresh listing"),
        Line::from("    ?               Toggle this help"),
        Line::from("    q / Esc         Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(COLOR_HELP_HINT),
        )),
        Line::from(""),
    ];

    let help_height = help_text.len() as u16 + 2;
    let help_width = 42;
    let area = f.area();
    let help_area = Rect {
        x: area.width.saturating_sub(help_width) / 2,
        y: area.height.saturating_sub(help_height) / 2,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    f.render_widget(Clear, help_area);
    let help_block = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(COLOR_BODY_BG)),
        )
        .style(Style::default().fg(COLOR_TITLE).bg(COLOR_BODY_BG));
    f.render_widget(help_block, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_range_keeps_offset_when_focus_inside() {
        assert_eq!(visible_range(0, Some(3), 10, 100), 0..10);
        assert_eq!(visible_range(20, Some(25), 10, 100), 20..30);
    }

    #[test]
    fn visible_range_follows_focus() {
        assert_eq!(visible_range(0, Some(15), 10, 100), 6..16);
        assert_eq!(visible_range(50, Some(4), 10, 100), 4..14);
    }

    #[test]
    fn visible_range_clamps_to_listing() {
        assert_eq!(visible_range(0, Some(2), 10, 3), 0..3);
        assert_eq!(visible_range(40, None, 10, 5), 4..5);
        assert_eq!(visible_range(0, None, 10, 0), 0..0);
    }
}
