use crate::ops::OpError;
use crate::ops::task_store::CLEAR_SENTINEL;
use crate::tui::app::{App, DateInput, InputPurpose, Mode, MoveState, TagRemoval};
use crate::tui::keymap::Action;

/// Single-key commands in the normal view. Commands that act on a task
/// resolve the cursor to a task id first and do nothing on an empty view.
pub(super) fn run(app: &mut App, action: Action) {
    match action {
        Action::Add => app.open_text_input(InputPurpose::AddTask, "Add new task:", ""),
        Action::AddContext => app.open_text_input(InputPurpose::AddContext, "New context name:", ""),
        Action::RenameContext => {
            let current = app.contexts.current().to_string();
            app.open_text_input(InputPurpose::RenameContext, "Rename context to:", &current);
        }
        Action::DeleteContext => {
            if app.contexts.len() <= 1 {
                app.set_error(OpError::LastContext);
            } else {
                let prompt = format!("Delete context '{}'? (y/n):", app.contexts.current());
                app.open_text_input(InputPurpose::DeleteConfirm, prompt, "");
            }
        }
        Action::Kanban => {
            app.mode = Mode::Kanban {
                scroll_x: 0,
                scroll_y: 0,
            }
        }
        Action::Stats => app.mode = Mode::Stats,
        Action::Undo => app.undo(),
        _ => on_selected(app, action),
    }
}

fn on_selected(app: &mut App, action: Action) {
    let Some(task) = app.current_task() else {
        return;
    };
    let id = task.id;
    match action {
        Action::Toggle => {
            app.commit(|a| Ok(a.store.toggle_checked(id)));
        }
        Action::Delete => {
            if app.commit(|a| Ok(a.store.delete(id).is_some())) {
                tracing::debug!(task = %id, "deleted task");
            }
        }
        Action::CyclePriority => {
            app.commit(|a| Ok(a.store.cycle_priority(id)));
        }
        Action::ClearDueDate => {
            app.commit(|a| a.store.set_due_date(id, CLEAR_SENTINEL));
        }
        Action::Edit => {
            let text = task.text.clone();
            app.open_text_input(InputPurpose::EditTask(id), "Edit task:", &text);
        }
        Action::AddTag => app.open_text_input(InputPurpose::AddTag(id), "Add tag:", ""),
        Action::RemoveTag => {
            if task.tags.is_empty() {
                app.set_error(OpError::NoTags);
            } else {
                app.mode = Mode::TagRemoval(TagRemoval::new(task));
            }
        }
        Action::SetDueDate => {
            let date = task.due_date.unwrap_or(app.today);
            app.mode = Mode::DateInput(DateInput::new(id, date));
        }
        Action::Move => {
            app.mode = Mode::Normal {
                moving: Some(MoveState {
                    task_id: id,
                    origin: app.store.snapshot(),
                }),
            };
        }
        _ => {}
    }
}
