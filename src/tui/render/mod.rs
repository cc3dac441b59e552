pub mod help_overlay;
mod helpers;
pub mod kanban;
pub mod popup;
pub mod stats_view;
pub mod status_row;
pub mod tab_bar;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    match &app.mode {
        Mode::Kanban { scroll_x, scroll_y } => {
            kanban::render_kanban(frame, app, chunks[1], *scroll_x, *scroll_y)
        }
        Mode::Stats => stats_view::render_stats(frame, app, chunks[1]),
        _ => task_list::render_task_list(frame, app, chunks[1]),
    }

    // Modal popups float over the task list
    match &app.mode {
        Mode::TextInput(input) => popup::render_text_input(frame, app, area, input),
        Mode::DateInput(input) => popup::render_date_input(frame, app, area, input),
        Mode::TagRemoval(dialog) => popup::render_tag_removal(frame, app, area, dialog),
        _ => {}
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_helpers::*;

    #[test]
    fn full_frame_normal_view() {
        let app = sample_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Work 2"));
        assert!(output.contains("Write report"));
        assert!(output.contains("q quit"));
    }

    #[test]
    fn full_frame_with_popup_and_help() {
        let mut app = sample_app();
        app.open_text_input(crate::tui::app::InputPurpose::AddTag(crate::model::TaskId(1)), "Add tag:", "");
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Add tag:"));

        app.show_help = true;
        let output = render_to_string(TERM_W, 40, |frame, _| render(frame, &app));
        assert!(output.contains("Key Bindings"));
    }

    #[test]
    fn full_frame_stats() {
        let mut app = sample_app();
        app.mode = Mode::Stats;
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("By context"));
    }
}
