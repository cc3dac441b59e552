use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, DATE_FIELD_LABELS, DateInput, TagRemoval, TextInput};
use crate::util::unicode;

use super::helpers::centered_fixed;

const POPUP_WIDTH: u16 = 50;

fn popup_block(app: &App, title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(app.theme.highlight).bg(app.theme.background))
        .style(Style::default().bg(app.theme.background))
}

/// Prompt plus a single-line buffer with a visible cursor
pub fn render_text_input(frame: &mut Frame, app: &App, area: Rect, input: &TextInput) {
    let popup = centered_fixed(POPUP_WIDTH, 5, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let inner_width = popup.width.saturating_sub(2) as usize;
    // Keep the tail of long buffers visible
    let cursor_col = unicode::byte_offset_to_display_col(&input.buffer, input.cursor);
    let skip = (cursor_col + 1).saturating_sub(inner_width);
    let visible: String = skip_cols(&input.buffer, skip);

    let lines = vec![
        Line::from(Span::styled(
            input.prompt.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            unicode::truncate_to_width(&visible, inner_width),
            Style::default().fg(app.theme.text).bg(bg),
        )),
    ];
    let block = popup_block(app, "Input");
    frame.render_widget(Paragraph::new(lines).block(block), popup);

    frame.set_cursor_position(Position::new(
        popup.x + 1 + cursor_col.saturating_sub(skip) as u16,
        popup.y + 3,
    ));
}

fn skip_cols(s: &str, cols: usize) -> String {
    let mut width = 0;
    let mut start = 0;
    while width < cols {
        let Some(next) = unicode::next_grapheme_boundary(s, start) else {
            break;
        };
        width += unicode::display_width(&s[start..next]);
        start = next;
    }
    s[start..].to_string()
}

/// Day / Month / Year fields, the focused one highlighted
pub fn render_date_input(frame: &mut Frame, app: &App, area: Rect, input: &DateInput) {
    let popup = centered_fixed(POPUP_WIDTH, 7, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            "Set due date (YYYY-MM-DD):",
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
    ];
    for (i, (label, value)) in DATE_FIELD_LABELS.iter().zip(&input.fields).enumerate() {
        let style = if i == input.focus {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        lines.push(Line::from(Span::styled(format!("{}: {}", label, value), style)));
    }
    frame.render_widget(Paragraph::new(lines).block(popup_block(app, "Due date")), popup);
}

/// Checkbox list of the task's tags
pub fn render_tag_removal(frame: &mut Frame, app: &App, area: Rect, dialog: &TagRemoval) {
    let height = (dialog.tags.len() as u16).saturating_add(4);
    let popup = centered_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);

    let bg = app.theme.background;
    let mut lines = vec![
        Line::from(Span::styled(
            "Select tags to remove:",
            Style::default().fg(app.theme.text_bright).bg(bg),
        )),
        Line::from(""),
    ];
    for (i, (tag, &marked)) in dialog.tags.iter().zip(&dialog.marked).enumerate() {
        let checkbox = if marked { "[\u{2713}]" } else { "[ ]" };
        let style = if i == dialog.cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        lines.push(Line::from(Span::styled(format!("{} {}", checkbox, tag), style)));
    }
    frame.render_widget(Paragraph::new(lines).block(popup_block(app, "Tags")), popup);
}
