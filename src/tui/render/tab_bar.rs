use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the tab bar: one tab per context, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    )));
    frame.render_widget(sep, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg_style = Style::default().bg(app.theme.background);
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.purple).bg(app.theme.background),
        ),
        Span::styled(" ", bg_style),
    ];

    // The board shows every context at once, so no tab is "current" there
    let on_board = matches!(app.mode, Mode::Kanban { .. } | Mode::Stats);
    for name in app.contexts.names() {
        let is_current = !on_board && name == app.contexts.current();
        let count = app.store.tasks_in(name).filter(|t| !t.checked).count();
        let label = if count > 0 {
            format!(" {} {} ", name, count)
        } else {
            format!(" {} ", name)
        };
        spans.push(Span::styled(label, tab_style(app, is_current)));
        spans.push(sep.clone());
    }

    let title = match app.mode {
        Mode::Kanban { .. } => Some(" Kanban "),
        Mode::Stats => Some(" Stats "),
        _ => None,
    };
    if let Some(title) = title {
        spans.push(Span::styled(title, tab_style(app, true)));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(bg_style);
    frame.render_widget(tabs, area);
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(app.theme.background)
    }
}
