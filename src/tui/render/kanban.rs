use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::task_label;

const COLUMN_WIDTH: usize = 35;
const SEPARATOR: &str = " \u{2502} ";
const SEPARATOR_WIDTH: usize = 3;

/// Render every context as a column. `scroll_x` is the first visible
/// column; `scroll_y` the first visible row.
pub fn render_kanban(frame: &mut Frame, app: &App, area: Rect, scroll_x: usize, scroll_y: usize) {
    let bg = app.theme.background;
    let names: Vec<&str> = app.contexts.names().collect();
    let visible = (area.width as usize / (COLUMN_WIDTH + SEPARATOR_WIDTH)).max(1);
    let first = scroll_x.min(names.len().saturating_sub(visible));

    let columns: Vec<Vec<Span>> = names
        .iter()
        .skip(first)
        .take(visible)
        .map(|name| column(app, name))
        .collect();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    let blank = Span::styled(" ".repeat(COLUMN_WIDTH), Style::default().bg(bg));
    let sep_style = Style::default().fg(app.theme.dim).bg(bg);

    let lines: Vec<Line> = (0..rows)
        .skip(scroll_y)
        .take(area.height as usize)
        .map(|row| {
            let mut spans = Vec::new();
            for (i, col) in columns.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(SEPARATOR, sep_style));
                }
                spans.push(col.get(row).cloned().unwrap_or_else(|| blank.clone()));
            }
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// One cell per row: header, rule, then each task's wrapped label
fn column(app: &App, name: &str) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let mut cells = vec![
        cell(
            name,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        cell(
            &"\u{2500}".repeat(COLUMN_WIDTH),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ];
    for task in app.store.tasks_in(name) {
        let bullet = if task.checked { "\u{2713} " } else { "\u{2022} " };
        let style = if task.checked {
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else if task.is_overdue(app.today) {
            Style::default().fg(app.theme.red).bg(bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let wrapped = unicode::wrap_to_width(&task_label(task), COLUMN_WIDTH - 2);
        for (i, line) in wrapped.iter().enumerate() {
            let prefix = if i == 0 { bullet } else { "  " };
            cells.push(cell(&format!("{}{}", prefix, line), style));
        }
    }
    cells
}

/// Pad or cut to exactly one column width
fn cell(text: &str, style: Style) -> Span<'static> {
    let text = unicode::truncate_to_width(text, COLUMN_WIDTH);
    let pad = COLUMN_WIDTH.saturating_sub(unicode::display_width(&text));
    Span::styled(format!("{}{}", text, " ".repeat(pad)), style)
}
