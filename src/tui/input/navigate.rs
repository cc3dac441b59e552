use crate::ops::VisualIndex;
use crate::ops::view::Direction;
use crate::tui::app::App;
use crate::tui::keymap::Action;

/// Up/Down in the task list, wrapping at both ends
pub(super) fn move_cursor(app: &mut App, action: Action) {
    let dir = match action {
        Action::Up => Direction::Up,
        Action::Down => Direction::Down,
        _ => return,
    };
    app.cursor = app.view().step(app.cursor, dir);
}

/// Left/Right cycle the current context. The cursor always re-anchors at
/// the top of the new context.
pub(super) fn switch_context(app: &mut App, action: Action) {
    match action {
        Action::Left => app.contexts.cycle_previous(),
        Action::Right => app.contexts.cycle_next(),
        _ => return,
    }
    app.cursor = VisualIndex(0);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::super::test_support::*;
    use super::*;

    #[test]
    fn cursor_wraps() {
        let mut app = app();
        add(&mut app, "a");
        add(&mut app, "b");
        add(&mut app, "c");
        app.cursor = VisualIndex(0);
        key(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, VisualIndex(2));
        key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, VisualIndex(0));
    }

    #[test]
    fn cursor_keys_on_empty_view_are_noops() {
        let mut app = app();
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, VisualIndex(0));
        assert!(app.current_task().is_none());
    }

    #[test]
    fn context_switch_resets_cursor() {
        let mut app = app();
        add(&mut app, "w1");
        add(&mut app, "w2");
        key(&mut app, KeyCode::Char('n'));
        chars(&mut app, "Home");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.contexts.current(), "Home");

        key(&mut app, KeyCode::Right);
        assert_eq!(app.contexts.current(), "Work");
        assert_eq!(app.cursor, VisualIndex(0));
        key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.contexts.current(), "Home");
        // two adds; neither the new context nor navigation snapshot
        assert_eq!(app.history.len(), 2);
    }
}
