use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::model::Task;
use crate::tui::app::App;
use crate::util::unicode;

/// Checkbox for a task row
pub(super) fn checkbox(task: &Task) -> &'static str {
    if task.checked { "[\u{2713}]" } else { "[ ]" }
}

fn text_with_tags(task: &Task) -> String {
    if task.tags.is_empty() {
        return task.text.clone();
    }
    let tags: Vec<&str> = task.tags.iter().map(String::as_str).collect();
    format!("{} > {}", task.text, tags.join(", "))
}

/// Text, tags and due date as shown on kanban cards
pub(super) fn task_label(task: &Task) -> String {
    let mut label = text_with_tags(task);
    if let Some(due) = task.due_label() {
        label.push_str(&format!(" [Due: {}]", due));
    }
    label
}

/// Spans for one task row: checkbox, priority marker, text, tags, due date.
pub(super) fn task_spans(app: &App, task: &Task, base: Style, width: usize) -> Vec<Span<'static>> {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(format!("{} ", checkbox(task)), base)];

    let marker = task.priority.marker();
    if !marker.is_empty() {
        spans.push(Span::styled(
            format!("{} ", marker),
            base.fg(theme.priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let text_style = if task.checked {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base
    };
    let used = spans_width(&spans);
    let text = text_with_tags(task);
    let due = task.due_label().map(|d| format!(" [Due: {}]", d));
    let due_width = due.as_deref().map_or(0, unicode::display_width);
    let room = width.saturating_sub(used + due_width);
    spans.push(Span::styled(unicode::truncate_to_width(&text, room), text_style));

    if let Some(due) = due {
        let due_style = if task.is_overdue(app.today) {
            base.fg(theme.red)
        } else {
            base.fg(theme.cyan)
        };
        spans.push(Span::styled(due, due_style));
    }
    spans
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A centered rectangle of fixed size, shrunk to fit the parent
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
