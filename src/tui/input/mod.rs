mod board;
mod command;
mod edit;
mod move_mode;
mod navigate;
mod tags;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Effect, Mode, ModeKind};
use super::keymap::{Action, KeyMap};

/// Handler class selected by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ignore,
    Quit,
    Help,
    /// Cursor up/down in the task list
    Cursor,
    /// Previous/next context
    SwitchContext,
    /// Single-key command in the normal view
    Command,
    /// Swap the picked-up task with its neighbour
    MoveStep,
    DropTask,
    CancelMove,
    /// Kanban scrolling
    Scroll,
    /// Leave kanban or stats
    CloseView,
    /// Editing keystroke inside a modal
    Edit,
    /// Commit a modal
    Submit,
    /// Discard a modal
    Cancel,
}

/// The transition table: every (mode, action) pair resolves to a route.
pub fn route(mode: ModeKind, action: &Action) -> Route {
    use Action as A;
    use ModeKind as M;
    match (mode, action) {
        (M::Normal | M::Kanban | M::Stats, A::Help) => Route::Help,

        (M::Normal, A::Up | A::Down) => Route::Cursor,
        (M::Normal, A::Left | A::Right) => Route::SwitchContext,
        (M::Normal, A::Quit) => Route::Quit,
        (
            M::Normal,
            A::Toggle
            | A::Add
            | A::Edit
            | A::Delete
            | A::AddContext
            | A::RenameContext
            | A::DeleteContext
            | A::CyclePriority
            | A::AddTag
            | A::RemoveTag
            | A::SetDueDate
            | A::ClearDueDate
            | A::Kanban
            | A::Stats
            | A::Undo
            | A::Move,
        ) => Route::Command,
        (M::Normal, _) => Route::Ignore,

        (M::Moving, A::Up | A::Down) => Route::MoveStep,
        (M::Moving, A::Move | A::Confirm) => Route::DropTask,
        (M::Moving, A::Back) => Route::CancelMove,
        (M::Moving, _) => Route::Ignore,

        (M::Kanban, A::Up | A::Down | A::Left | A::Right) => Route::Scroll,
        (M::Kanban, A::Kanban | A::Back | A::Quit) => Route::CloseView,
        (M::Kanban, _) => Route::Ignore,

        (M::Stats, A::Stats | A::Back | A::Quit) => Route::CloseView,
        (M::Stats, _) => Route::Ignore,

        (M::TextInput | M::DateInput | M::TagRemoval, A::Back) => Route::Cancel,
        (M::TextInput | M::DateInput | M::TagRemoval, A::Confirm) => Route::Submit,
        (
            M::TextInput | M::DateInput,
            A::Insert(_)
            | A::Backspace
            | A::DeleteForward
            | A::Left
            | A::Right
            | A::Home
            | A::End
            | A::NextField
            | A::PrevField,
        ) => Route::Edit,
        (M::TagRemoval, A::Up | A::Down | A::Toggle) => Route::Edit,
        (M::TextInput | M::DateInput | M::TagRemoval, _) => Route::Ignore,
    }
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let kind = app.mode.kind();
    let action = match kind {
        ModeKind::TextInput | ModeKind::DateInput => KeyMap::text_entry(key),
        _ => app.keymap.command(key),
    };
    let Some(action) = action else {
        return;
    };

    // Help overlay intercepts all input
    if app.show_help {
        if matches!(action, Action::Help | Action::Back) {
            app.show_help = false;
        }
        return;
    }

    dispatch(app, route(kind, &action), action);
}

fn dispatch(app: &mut App, route: Route, action: Action) {
    match route {
        Route::Ignore => {}
        Route::Quit => app.request(Effect::Quit),
        Route::Help => app.show_help = true,
        Route::Cursor => navigate::move_cursor(app, action),
        Route::SwitchContext => navigate::switch_context(app, action),
        Route::Command => command::run(app, action),
        Route::MoveStep => move_mode::step(app, action),
        Route::DropTask => move_mode::drop_task(app),
        Route::CancelMove => move_mode::cancel(app),
        Route::Scroll => board::scroll(app, action),
        Route::CloseView => app.return_to_normal(),
        Route::Edit => edit_key(app, action),
        Route::Submit => submit(app),
        Route::Cancel => app.return_to_normal(),
    }
}

fn edit_key(app: &mut App, action: Action) {
    match &mut app.mode {
        Mode::TextInput(input) => edit::edit_text(input, action),
        Mode::DateInput(input) => edit::edit_date(input, action),
        Mode::TagRemoval(dialog) => tags::edit(dialog, action),
        _ => {}
    }
}

/// Take the modal out of the app, leaving Normal behind, and commit it.
fn submit(app: &mut App) {
    match std::mem::replace(&mut app.mode, Mode::normal()) {
        Mode::TextInput(input) => edit::submit_text(app, input),
        Mode::DateInput(input) => edit::submit_date(app, input),
        Mode::TagRemoval(dialog) => tags::submit(app, dialog),
        other => app.mode = other,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    const ALL_ACTIONS: &[Action] = &[
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Toggle,
        Action::Add,
        Action::Edit,
        Action::Delete,
        Action::AddContext,
        Action::RenameContext,
        Action::DeleteContext,
        Action::CyclePriority,
        Action::AddTag,
        Action::RemoveTag,
        Action::SetDueDate,
        Action::ClearDueDate,
        Action::Kanban,
        Action::Stats,
        Action::Undo,
        Action::Move,
        Action::Help,
        Action::Quit,
        Action::Back,
        Action::Confirm,
        Action::Insert('x'),
        Action::Backspace,
        Action::DeleteForward,
        Action::Home,
        Action::End,
        Action::NextField,
        Action::PrevField,
    ];

    #[test]
    fn back_cancels_every_modal() {
        for mode in ModeKind::ALL.into_iter().filter(|m| m.is_modal()) {
            assert_eq!(route(mode, &Action::Back), Route::Cancel, "{:?}", mode);
            assert_eq!(route(mode, &Action::Confirm), Route::Submit, "{:?}", mode);
        }
    }

    #[test]
    fn only_normal_mode_runs_commands() {
        for mode in ModeKind::ALL {
            for action in ALL_ACTIONS {
                if route(mode, action) == Route::Command {
                    assert_eq!(mode, ModeKind::Normal, "{:?}", action);
                }
            }
        }
    }

    #[test]
    fn moving_ignores_everything_but_its_own_keys() {
        for action in ALL_ACTIONS {
            let expected = match action {
                Action::Up | Action::Down => Route::MoveStep,
                Action::Move | Action::Confirm => Route::DropTask,
                Action::Back => Route::CancelMove,
                _ => Route::Ignore,
            };
            assert_eq!(route(ModeKind::Moving, action), expected, "{:?}", action);
        }
    }

    #[test]
    fn views_close_on_toggle_back_and_quit() {
        for action in [Action::Kanban, Action::Back, Action::Quit] {
            assert_eq!(route(ModeKind::Kanban, &action), Route::CloseView);
        }
        for action in [Action::Stats, Action::Back, Action::Quit] {
            assert_eq!(route(ModeKind::Stats, &action), Route::CloseView);
        }
        assert_eq!(route(ModeKind::Stats, &Action::Add), Route::Ignore);
        assert_eq!(route(ModeKind::Kanban, &Action::Left), Route::Scroll);
    }

    #[test]
    fn quit_only_from_normal() {
        for mode in ModeKind::ALL {
            let expected = mode == ModeKind::Normal;
            assert_eq!(route(mode, &Action::Quit) == Route::Quit, expected, "{:?}", mode);
        }
    }

    #[test]
    fn quit_key_requests_quit_effect() {
        let mut app = app();
        key(&mut app, KeyCode::Char('q'));
        let (_, effects) = crate::tui::app::update(app, crate::tui::app::AppEvent::Resize(1, 1));
        assert_eq!(effects, vec![Effect::Quit]);
    }

    #[test]
    fn typing_q_in_a_prompt_does_not_quit() {
        let mut app = app();
        add(&mut app, "quit smoking");
        assert_eq!(texts(&app), vec!["quit smoking"]);
        assert_eq!(app.mode, Mode::normal());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        key(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        key(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::normal());
        key(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
