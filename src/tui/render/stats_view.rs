use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::stats;
use crate::tui::app::App;

/// Render overall and per-context completion
pub fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let stats = stats::compute(&app.store, &app.contexts, app.today);

    let header = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(app.theme.dim).bg(bg);
    let value = Style::default().fg(app.theme.text).bg(bg);

    let mut lines = vec![
        Line::from(Span::styled(" Overall", header)),
        Line::from(vec![
            Span::styled("   Total tasks: ", label),
            Span::styled(stats.total.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("   Completed:   ", label),
            Span::styled(
                format!("{} ({:.1}%)", stats.completed, stats.completion_rate()),
                value.fg(app.theme.green),
            ),
        ]),
        Line::from(vec![
            Span::styled("   Overdue:     ", label),
            Span::styled(
                stats.overdue.to_string(),
                if stats.overdue > 0 {
                    value.fg(app.theme.red)
                } else {
                    value
                },
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(" By context", header)),
    ];

    let name_width = stats
        .contexts
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    for ctx in &stats.contexts {
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<width$}  ", ctx.name, width = name_width), value),
            Span::styled(
                format!(
                    "{}/{} ({:.1}%)",
                    ctx.completed,
                    ctx.total,
                    ctx.completion_rate()
                ),
                label,
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
