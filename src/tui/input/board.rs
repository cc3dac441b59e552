use crate::tui::app::{App, Mode};
use crate::tui::keymap::Action;

/// Kanban scrolling: horizontal offset stays within the column count,
/// vertical offset only saturates at zero.
pub(super) fn scroll(app: &mut App, action: Action) {
    let columns = app.contexts.len();
    let Mode::Kanban { scroll_x, scroll_y } = &mut app.mode else {
        return;
    };
    match action {
        Action::Left => *scroll_x = scroll_x.saturating_sub(1),
        Action::Right => *scroll_x = (*scroll_x + 1).min(columns.saturating_sub(1)),
        Action::Up => *scroll_y = scroll_y.saturating_sub(1),
        Action::Down => *scroll_y += 1,
        _ => {}
    }
}
