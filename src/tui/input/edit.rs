use crate::ops::VisualIndex;
use crate::tui::app::{App, DateInput, Effect, InputPurpose, TextInput};
use crate::tui::keymap::Action;

pub(super) fn edit_text(input: &mut TextInput, action: Action) {
    match action {
        Action::Insert(c) => input.insert(c),
        Action::Backspace => input.backspace(),
        Action::DeleteForward => input.delete_forward(),
        Action::Left => input.move_left(),
        Action::Right => input.move_right(),
        Action::Home => input.home(),
        Action::End => input.end(),
        _ => {}
    }
}

pub(super) fn edit_date(input: &mut DateInput, action: Action) {
    match action {
        Action::Insert(c) => input.insert(c),
        Action::Backspace => input.backspace(),
        Action::NextField => input.next_field(),
        Action::PrevField => input.prev_field(),
        _ => {}
    }
}

/// Commit a text prompt. The buffer is trimmed and an empty result is a
/// cancellation: no mutation, no snapshot.
pub(super) fn submit_text(app: &mut App, input: TextInput) {
    let value = input.value();
    if value.is_empty() {
        return;
    }
    match input.purpose {
        InputPurpose::AddTask => {
            let context = app.contexts.current().to_string();
            let mut added = None;
            app.commit(|a| {
                added = a.store.add(value, &context);
                Ok(added.is_some())
            });
            if let Some(id) = added
                && let Some(at) = app.view().position_of(id)
            {
                tracing::debug!(task = %id, context = %context, "added task");
                app.cursor = at;
            }
        }
        InputPurpose::EditTask(id) => {
            app.commit(|a| Ok(a.store.edit(id, value)));
        }
        InputPurpose::AddTag(id) => {
            app.commit(|a| Ok(a.store.add_tag(id, value)));
        }
        // The task list is untouched, so there is nothing to snapshot.
        InputPurpose::AddContext => match app.contexts.add(value) {
            Ok(()) => {
                tracing::debug!(context = %value, "added context");
                app.cursor = VisualIndex(0);
                app.request(Effect::Save);
            }
            Err(e) => app.set_error(e),
        },
        InputPurpose::RenameContext => {
            if app.commit(|a| a.contexts.rename(value, &mut a.store)) {
                tracing::debug!(context = %value, "renamed context");
            }
        }
        InputPurpose::DeleteConfirm => {
            if !value.eq_ignore_ascii_case("y") {
                return;
            }
            let name = app.contexts.current().to_string();
            if app.commit(|a| a.contexts.delete(&mut a.store).map(|_| true)) {
                tracing::debug!(context = %name, "deleted context");
                app.cursor = VisualIndex(0);
            }
        }
    }
}

/// Commit the date dialog. A malformed date reports and changes nothing.
pub(super) fn submit_date(app: &mut App, input: DateInput) {
    let date = input.compose();
    app.commit(|a| a.store.set_due_date(input.task_id, &date));
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use super::super::test_support::*;
    use crate::ops::VisualIndex;
    use crate::tui::app::{Mode, ModeKind};

    #[test]
    fn whitespace_only_input_is_a_cancel() {
        let mut app = app();
        add(&mut app, "   ");
        assert!(app.store.is_empty());
        assert!(app.history.is_empty());
        assert_eq!(app.mode, Mode::normal());
    }

    #[test]
    fn input_is_trimmed() {
        let mut app = app();
        add(&mut app, "  pad  ");
        assert_eq!(texts(&app), vec!["pad"]);
    }

    #[test]
    fn edit_commits_new_text() {
        let mut app = app();
        add(&mut app, "old");
        key(&mut app, KeyCode::Char('e'));
        for _ in 0..3 {
            key(&mut app, KeyCode::Backspace);
        }
        chars(&mut app, "new");
        key(&mut app, KeyCode::Enter);
        assert_eq!(texts(&app), vec!["new"]);
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn duplicate_context_reports_without_change() {
        let mut app = app();
        key(&mut app, KeyCode::Char('n'));
        chars(&mut app, "Work");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("Context already exists"));
        assert_eq!(app.contexts.len(), 1);
    }

    #[test]
    fn rename_prefills_and_propagates() {
        let mut app = app();
        add(&mut app, "a");
        key(&mut app, KeyCode::Char('r'));
        for _ in 0.."Work".len() {
            key(&mut app, KeyCode::Backspace);
        }
        chars(&mut app, "Job");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.contexts.current(), "Job");
        assert_eq!(app.store.tasks()[0].context, "Job");
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn rename_to_existing_name_fails() {
        let mut app = app();
        key(&mut app, KeyCode::Char('n'));
        chars(&mut app, "Home");
        key(&mut app, KeyCode::Enter);
        key(&mut app, KeyCode::Char('r'));
        for _ in 0.."Home".len() {
            key(&mut app, KeyCode::Backspace);
        }
        chars(&mut app, "Work");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.message.as_deref(), Some("Context name already exists"));
        assert_eq!(app.contexts.current(), "Home");
    }

    #[test]
    fn delete_context_needs_y() {
        let mut app = app();
        add(&mut app, "w");
        key(&mut app, KeyCode::Char('n'));
        chars(&mut app, "Home");
        key(&mut app, KeyCode::Enter);
        add(&mut app, "h1");
        add(&mut app, "h2");

        key(&mut app, KeyCode::Char('D'));
        chars(&mut app, "n");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.contexts.len(), 2);

        key(&mut app, KeyCode::Char('D'));
        chars(&mut app, " Y ");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.contexts.len(), 1);
        assert_eq!(app.contexts.current(), "Work");
        assert_eq!(app.cursor, VisualIndex(0));
        assert_eq!(texts(&app), vec!["w"]);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn add_tag_is_idempotent() {
        let mut app = app();
        add(&mut app, "t");
        for _ in 0..2 {
            key(&mut app, KeyCode::Char('t'));
            chars(&mut app, "urgent");
            key(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.current_task().unwrap().tags.len(), 1);
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn date_dialog_prefills_today_and_commits() {
        let mut app = app();
        app.today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        add(&mut app, "t");
        key(&mut app, KeyCode::Char('u'));
        assert_eq!(app.mode.kind(), ModeKind::DateInput);
        // retype the day as 9
        key(&mut app, KeyCode::Backspace);
        key(&mut app, KeyCode::Backspace);
        chars(&mut app, "9");
        key(&mut app, KeyCode::Enter);
        assert_eq!(
            app.current_task().unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn invalid_date_reports_and_keeps_old_value() {
        let mut app = app();
        app.today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        add(&mut app, "t");
        key(&mut app, KeyCode::Char('u'));
        key(&mut app, KeyCode::Enter);
        let history = app.history.len();

        key(&mut app, KeyCode::Char('u'));
        key(&mut app, KeyCode::Tab);
        key(&mut app, KeyCode::Backspace);
        key(&mut app, KeyCode::Backspace);
        chars(&mut app, "13");
        key(&mut app, KeyCode::Enter);
        assert_eq!(
            app.message.as_deref(),
            Some("Invalid date format. Use YYYY-MM-DD")
        );
        assert_eq!(
            app.current_task().unwrap().due_date,
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
        assert_eq!(app.history.len(), history);
        assert_eq!(app.mode, Mode::normal());
    }
}
