use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, MoveState};

use super::helpers::{spans_width, task_spans};

/// Render the current context's tasks. The list scrolls so the cursor row
/// stays on screen.
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let view = app.view();

    if view.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            " No tasks in this context. Press 'a' to add one.",
            Style::default().fg(app.theme.dim).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(hint, area);
        return;
    }

    let moving = match &app.mode {
        Mode::Normal {
            moving: Some(MoveState { task_id, .. }),
        } => Some(*task_id),
        _ => None,
    };

    let height = area.height as usize;
    let width = area.width as usize;
    let offset = (app.cursor.0 + 1).saturating_sub(height);

    let mut lines: Vec<Line> = Vec::new();
    for (row, &id) in view.ids().iter().enumerate().skip(offset).take(height) {
        let Some(task) = app.store.get(id) else {
            continue;
        };
        let selected = row == app.cursor.0;
        let base = if selected {
            Style::default().fg(app.theme.text_bright).bg(app.theme.selection_bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };

        let mut spans = vec![Span::styled(if selected { " \u{25B8} " } else { "   " }, base)];
        if moving == Some(id) {
            spans.push(Span::styled(
                "\u{2195} ",
                base.fg(app.theme.highlight).add_modifier(Modifier::BOLD),
            ));
        }
        let used = spans_width(&spans);
        let row_style = if moving == Some(id) {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };
        spans.extend(task_spans(app, task, row_style, width.saturating_sub(used)));

        // Fill the rest of a selected row with the selection background
        let filled = spans_width(&spans);
        if selected && filled < width {
            spans.push(Span::styled(" ".repeat(width - filled), base));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
