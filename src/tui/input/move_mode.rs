use crate::ops::view::Direction;
use crate::tui::app::{App, Effect, Mode, MoveState};
use crate::tui::keymap::Action;

/// Swap the picked-up task with its neighbour. The task is located by id,
/// so the step is correct even if the cursor drifted.
pub(super) fn step(app: &mut App, action: Action) {
    let Mode::Normal {
        moving: Some(MoveState { task_id, .. }),
    } = &app.mode
    else {
        return;
    };
    let task_id = *task_id;
    let dir = match action {
        Action::Up => Direction::Up,
        Action::Down => Direction::Down,
        _ => return,
    };
    let view = app.view();
    let Some(at) = view.position_of(task_id) else {
        return;
    };
    if let Some(to) = app.store.swap_adjacent(&view, at, dir) {
        app.cursor = to;
    }
}

/// Put the task down. The pre-move order becomes one undo entry.
pub(super) fn drop_task(app: &mut App) {
    let Mode::Normal {
        moving: Some(state),
    } = std::mem::replace(&mut app.mode, Mode::normal())
    else {
        return;
    };
    if app.store.tasks() != state.origin.as_slice() {
        tracing::debug!(task = %state.task_id, "moved task");
        app.history.push(state.origin);
        app.request(Effect::Save);
    }
}

/// Abandon the move and restore the pre-move order
pub(super) fn cancel(app: &mut App) {
    let Mode::Normal {
        moving: Some(state),
    } = std::mem::replace(&mut app.mode, Mode::normal())
    else {
        return;
    };
    app.store.restore(state.origin);
    if let Some(at) = app.view().position_of(state.task_id) {
        app.cursor = at;
    }
}
