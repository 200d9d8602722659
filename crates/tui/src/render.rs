//! Per-view drawing. Reads navigator state, never mutates it.

use diamonds_core::{
    nav::{MenuEntry, NavState, UrlField, View},
    Project,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::theme::{parse_hex_color, Theme};

const APP_TITLE: &str = "💎 DIAMONDS";
const INPUT_WIDTH: u16 = 44;
const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// Draw the whole screen for the current view.
pub fn draw(frame: &mut Frame, theme: &Theme, state: &NavState, projects: &[Project]) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let selected = projects.get(state.selected_project);
    match state.view {
        View::ProjectList => draw_project_list(frame, chunks[0], theme, state, projects),
        View::ProjectMenu => draw_project_menu(frame, chunks[0], theme, state, selected),
        View::ColorList => draw_color_list(frame, chunks[0], theme, state, selected),
        View::UrlList => draw_url_list(frame, chunks[0], theme, state, selected),
        View::AddProject => draw_add_project(frame, chunks[0], theme, state),
        View::AddColor => draw_add_color(frame, chunks[0], theme, state),
        View::AddUrl => draw_add_url(frame, chunks[0], theme, state),
    }

    let help = Paragraph::new(help_keys(state.view).join(" • "))
        .style(Style::default().fg(theme.muted));
    frame.render_widget(help, chunks[1]);

    if let Some(message) = state.status.as_deref() {
        let status = Paragraph::new(Span::styled(
            format!(" {message} "),
            Style::default()
                .fg(theme.message_fg)
                .bg(theme.message_bg)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(status, chunks[2]);
    }
}

fn help_keys(view: View) -> &'static [&'static str] {
    match view {
        View::ProjectList => &["↑/↓ navigate", "enter open", "n new project", "q quit"],
        View::ProjectMenu => &["↑/↓ navigate", "enter select", "esc back", "q quit"],
        View::ColorList => &[
            "↑/↓ navigate",
            "enter copy",
            "n new color",
            "esc back",
            "q quit",
        ],
        View::UrlList => &[
            "↑/↓ navigate",
            "enter copy",
            "n new URL",
            "esc back",
            "q quit",
        ],
        View::AddProject | View::AddColor => &["enter save", "esc cancel"],
        View::AddUrl => &["enter next/save", "tab switch fields", "esc cancel"],
    }
}

/// Split a body area into a header line and the content below it.
fn with_header(frame: &mut Frame, area: Rect, theme: &Theme, title: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);
    let header = Paragraph::new(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(header, chunks[0]);
    chunks[1]
}

fn marker(theme: &Theme, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(SELECTED_MARKER, Style::default().fg(theme.selection))
    } else {
        Span::raw(UNSELECTED_MARKER)
    }
}

fn item_style(theme: &Theme, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(theme.selection)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    }
}

fn empty_hint(frame: &mut Frame, area: Rect, theme: &Theme, text: &str) {
    let hint = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(theme.muted),
    ));
    frame.render_widget(hint, area);
}

fn render_list(frame: &mut Frame, area: Rect, items: Vec<ListItem>, cursor: usize) {
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(cursor.min(items.len() - 1)));
    }
    frame.render_stateful_widget(List::new(items), area, &mut list_state);
}

fn draw_project_list(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    state: &NavState,
    projects: &[Project],
) {
    let body = with_header(frame, area, theme, APP_TITLE);
    if projects.is_empty() {
        empty_hint(frame, body, theme, "No projects yet. Press 'n' to add one.");
        return;
    }

    let items: Vec<ListItem> = projects
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            let selected = idx == state.cursor;
            let description = if selected {
                Style::default().fg(theme.selection)
            } else {
                Style::default().fg(theme.muted)
            };
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    marker(theme, selected),
                    Span::styled(project.name.clone(), item_style(theme, selected)),
                ]),
                Line::from(vec![
                    Span::raw(UNSELECTED_MARKER),
                    Span::styled(project.summary(), description),
                ]),
                Line::from(""),
            ]))
        })
        .collect();
    render_list(frame, body, items, state.cursor);
}

fn draw_project_menu(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    state: &NavState,
    project: Option<&Project>,
) {
    let title = project.map_or("", |p| p.name.as_str());
    let body = with_header(frame, area, theme, &format!("✨ {title}"));
    let lines: Vec<Line> = MenuEntry::ALL
        .iter()
        .map(|entry| {
            let selected = entry.cursor() == state.cursor;
            Line::from(vec![
                marker(theme, selected),
                Span::styled(entry.label(), item_style(theme, selected)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), body);
}

fn draw_color_list(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    state: &NavState,
    project: Option<&Project>,
) {
    let Some(project) = project else {
        return;
    };
    let body = with_header(frame, area, theme, &project.name);
    if project.colors.is_empty() {
        empty_hint(frame, body, theme, "No colors yet. Press 'n' to add one.");
        return;
    }

    let code_style = Style::default()
        .fg(theme.code_fg)
        .bg(theme.code_bg)
        .add_modifier(Modifier::BOLD);
    let items: Vec<ListItem> = project
        .colors
        .iter()
        .enumerate()
        .map(|(idx, color)| {
            let swatch = match parse_hex_color(color) {
                Some(fill) => Span::styled("  ", Style::default().bg(fill)),
                None => Span::raw("  "),
            };
            let selected = idx == state.cursor;
            let code = if selected {
                code_style.fg(theme.selection)
            } else {
                code_style
            };
            ListItem::new(Line::from(vec![
                marker(theme, selected),
                swatch,
                Span::raw(" "),
                Span::styled(format!(" {color} "), code),
            ]))
        })
        .collect();
    render_list(frame, body, items, state.cursor);
}

fn draw_url_list(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    state: &NavState,
    project: Option<&Project>,
) {
    let Some(project) = project else {
        return;
    };
    let body = with_header(frame, area, theme, &project.name);
    if project.urls.is_empty() {
        empty_hint(frame, body, theme, "No URLs yet. Press 'n' to add one.");
        return;
    }

    let items: Vec<ListItem> = project
        .urls
        .iter()
        .enumerate()
        .map(|(idx, named)| {
            let selected = idx == state.cursor;
            ListItem::new(Line::from(vec![
                marker(theme, selected),
                Span::styled(named.name.clone(), item_style(theme, selected)),
                Span::styled(format!("  {}", named.url), Style::default().fg(theme.muted)),
            ]))
        })
        .collect();
    render_list(frame, body, items, state.cursor);
}

/// Bordered single-line input. Returns the text cursor position when focused.
fn input_box(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    focused: bool,
) -> Option<(u16, u16)> {
    let width = INPUT_WIDTH.min(area.width);
    let rect = Rect::new(area.x, area.y, width, area.height.min(3));
    let (border, text) = if focused {
        (theme.border, theme.text)
    } else {
        (theme.muted, theme.muted)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let prompt = format!("{label}: {value}");
    let prompt_width = u16::try_from(prompt.chars().count()).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(prompt).style(Style::default().fg(text)).block(block),
        rect,
    );

    focused.then(|| {
        let last_inner = rect.x.saturating_add(rect.width.saturating_sub(2));
        let x = rect
            .x
            .saturating_add(1)
            .saturating_add(prompt_width)
            .min(last_inner);
        (x, rect.y + 1)
    })
}

fn draw_add_project(frame: &mut Frame, area: Rect, theme: &Theme, state: &NavState) {
    let body = with_header(frame, area, theme, "Add New Project");
    if let Some((x, y)) = input_box(frame, body, theme, "Project name", &state.input, true) {
        frame.set_cursor(x, y);
    }
}

fn draw_add_color(frame: &mut Frame, area: Rect, theme: &Theme, state: &NavState) {
    let body = with_header(frame, area, theme, "Add New Color");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(body);
    if let Some((x, y)) = input_box(frame, chunks[0], theme, "HEX color", &state.input, true) {
        frame.set_cursor(x, y);
    }
    empty_hint(frame, chunks[1], theme, "Enter HEX (e.g., #FF5F87)");
}

fn draw_add_url(frame: &mut Frame, area: Rect, theme: &Theme, state: &NavState) {
    let body = with_header(frame, area, theme, "Add New URL");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(body);
    let name_focused = state.focused_field == UrlField::Name;
    let name = input_box(frame, chunks[0], theme, "Name", &state.url_name, name_focused);
    let url = input_box(frame, chunks[1], theme, "URL", &state.input, !name_focused);
    if let Some((x, y)) = name.or(url) {
        frame.set_cursor(x, y);
    }
}
