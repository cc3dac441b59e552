use crate::tui::app::{App, TagRemoval};
use crate::tui::keymap::Action;

pub(super) fn edit(dialog: &mut TagRemoval, action: Action) {
    match action {
        Action::Up => dialog.up(),
        Action::Down => dialog.down(),
        Action::Toggle => dialog.toggle(),
        _ => {}
    }
}

/// Remove the marked tags. Nothing marked means nothing changes.
pub(super) fn submit(app: &mut App, dialog: TagRemoval) {
    let marked = dialog.marked_indices();
    if marked.is_empty() {
        return;
    }
    app.commit(|a| Ok(a.store.remove_tags(dialog.task_id, &marked)));
}
