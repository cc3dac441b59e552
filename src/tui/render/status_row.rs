use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, ModeKind};
use crate::util::unicode;

/// Render the status row (bottom of screen): the transient message if
/// there is one, otherwise key hints for the current mode.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(message) = &app.message {
        Line::from(Span::styled(
            unicode::truncate_to_width(&format!(" {}", message), width),
            Style::default().fg(app.theme.red).bg(bg),
        ))
    } else if app.show_key_hints {
        let hint = hint_for(app.mode.kind());
        let mut spans = Vec::new();
        let hint_width = unicode::display_width(hint);
        if hint_width < width {
            spans.push(Span::styled(
                " ".repeat(width - hint_width),
                Style::default().bg(bg),
            ));
        }
        spans.push(Span::styled(
            unicode::truncate_to_width(hint, width),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        Line::from(spans)
    } else {
        Line::from("")
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn hint_for(mode: ModeKind) -> &'static str {
    match mode {
        ModeKind::Normal => "a add  space done  m move  v board  s stats  ? help  q quit ",
        ModeKind::Moving => "\u{2191}\u{2193} move  m/Enter drop  Esc cancel ",
        ModeKind::Kanban => "\u{2190}\u{2192}\u{2191}\u{2193} scroll  v/Esc back ",
        ModeKind::Stats => "s/Esc back ",
        ModeKind::TextInput => "Enter confirm  Esc cancel ",
        ModeKind::DateInput => "Tab/\u{2191}\u{2193} field  Enter confirm  Esc cancel ",
        ModeKind::TagRemoval => "space mark  Enter remove  Esc cancel ",
    }
}
