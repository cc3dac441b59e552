//! End-to-end tests of the interactive state machine, driven through
//! `update` the same way the event loop drives it.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use ctodo::model::{AppConfig, Priority, Task, TaskId, TodoState};
use ctodo::ops::VisualIndex;
use ctodo::tui::{App, AppEvent, Effect, update};

fn state(tasks: &[(u64, &str, &str)]) -> TodoState {
    TodoState {
        tasks: tasks
            .iter()
            .map(|&(id, text, ctx)| Task::new(TaskId(id), text, ctx))
            .collect(),
        contexts: vec!["Work".into()],
        current_context: "Work".into(),
        next_id: tasks.len() as u64 + 1,
    }
}

fn start(tasks: &[(u64, &str, &str)]) -> App {
    let mut app = App::new(state(tasks), &AppConfig::default());
    app.today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    app
}

fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
    let current = std::mem::replace(app, start(&[]));
    let today = current.today;
    let (mut next, effects) = update(current, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    next.today = today;
    *app = next;
    effects
}

fn keys(app: &mut App, s: &str) {
    for c in s.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn clear_field(app: &mut App, n: usize) {
    for _ in 0..n {
        press(app, KeyCode::Backspace);
    }
}

fn visible(app: &App) -> Vec<(u64, String)> {
    app.view()
        .ids()
        .iter()
        .filter_map(|&id| app.store.get(id))
        .map(|t| (t.id.0, t.text.clone()))
        .collect()
}

fn ids(app: &App) -> Vec<u64> {
    app.store.tasks().iter().map(|t| t.id.0).collect()
}

#[test]
fn identity_survives_add_delete_and_reorder() {
    let mut app = start(&[(1, "a", "Work"), (2, "b", "Home"), (3, "c", "Work")]);

    press(&mut app, KeyCode::Char('a'));
    keys(&mut app, "d");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selected_id(), Some(TaskId(4)));

    // Move "d" above "c"
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Char('m'));

    // Delete "a"
    app.cursor = VisualIndex(0);
    press(&mut app, KeyCode::Char('d'));

    assert_eq!(
        visible(&app),
        vec![(4, "d".to_string()), (3, "c".to_string())]
    );
    assert_eq!(ids(&app), vec![2, 4, 3]);
}

#[test]
fn reorder_persists_across_context_switch() {
    let mut app = start(&[(1, "a", "Work"), (2, "x", "Home"), (3, "b", "Work")]);
    app.cursor = VisualIndex(1);
    press(&mut app, KeyCode::Char('m'));
    press(&mut app, KeyCode::Up);
    let effects = press(&mut app, KeyCode::Enter);
    assert_eq!(effects, vec![Effect::Save]);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.contexts.current(), "Home");
    press(&mut app, KeyCode::Left);
    assert_eq!(app.contexts.current(), "Work");
    assert_eq!(visible(&app), vec![(3, "b".to_string()), (1, "a".to_string())]);
}

type Script = Box<dyn Fn(&mut App)>;

fn script(f: impl Fn(&mut App) + 'static) -> Script {
    Box::new(f)
}

#[test]
fn every_mutation_is_undone_exactly() {
    let base = {
        let mut app = start(&[(1, "a", "Work"), (2, "b", "Work"), (3, "c", "Home")]);
        let mut tagged = app.store.snapshot();
        tagged[0].tags.insert("keep".into());
        app.store.restore(tagged);
        app
    };

    let scripts: Vec<(&str, Script)> = vec![
        ("toggle", script(|app| {
            press(app, KeyCode::Char(' '));
        })),
        ("add", script(|app| {
            press(app, KeyCode::Char('a'));
            keys(app, "new");
            press(app, KeyCode::Enter);
        })),
        ("edit", script(|app| {
            press(app, KeyCode::Char('e'));
            keys(app, "!");
            press(app, KeyCode::Enter);
        })),
        ("delete", script(|app| {
            press(app, KeyCode::Char('d'));
        })),
        ("priority", script(|app| {
            press(app, KeyCode::Char('p'));
        })),
        ("add tag", script(|app| {
            press(app, KeyCode::Char('t'));
            keys(app, "urgent");
            press(app, KeyCode::Enter);
        })),
        ("remove tag", script(|app| {
            press(app, KeyCode::Char('T'));
            press(app, KeyCode::Char(' '));
            press(app, KeyCode::Enter);
        })),
        ("due date", script(|app| {
            press(app, KeyCode::Char('u'));
            press(app, KeyCode::Enter);
        })),
        ("move", script(|app| {
            press(app, KeyCode::Char('m'));
            press(app, KeyCode::Down);
            press(app, KeyCode::Char('m'));
        })),
        ("delete context", script(|app| {
            press(app, KeyCode::Char('D'));
            keys(app, "y");
            press(app, KeyCode::Enter);
        })),
        ("rename context", script(|app| {
            press(app, KeyCode::Char('r'));
            clear_field(app, 4);
            keys(app, "Job");
            press(app, KeyCode::Enter);
        })),
    ];

    for (name, script) in scripts {
        let mut app = base.clone();
        let before = app.store.snapshot();
        script(&mut app);
        assert_ne!(app.store.snapshot(), before, "{} changed nothing", name);
        assert_eq!(app.history.len(), 1, "{} should push one snapshot", name);

        let effects = press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.store.snapshot(), before, "{} was not undone", name);
        assert_eq!(effects, vec![Effect::Save]);
        assert!(app.history.is_empty());
    }
}

#[test]
fn undoing_a_context_delete_brings_the_context_back() {
    let mut app = start(&[(1, "a", "Work"), (2, "b", "Home"), (3, "c", "Work")]);
    press(&mut app, KeyCode::Char('D'));
    keys(&mut app, "y");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.contexts.names().collect::<Vec<_>>(), vec!["Home"]);

    press(&mut app, KeyCode::Char('z'));
    assert_eq!(app.contexts.names().collect::<Vec<_>>(), vec!["Home", "Work"]);
    assert_eq!(app.contexts.current(), "Home");
    assert_eq!(app.cursor, VisualIndex(0));

    press(&mut app, KeyCode::Right);
    assert_eq!(app.contexts.current(), "Work");
    assert_eq!(visible(&app), vec![(1, "a".to_string()), (3, "c".to_string())]);
}

#[test]
fn undoing_a_rename_keeps_both_names() {
    let mut app = start(&[(1, "a", "Work"), (2, "b", "Home")]);
    press(&mut app, KeyCode::Char('r'));
    clear_field(&mut app, 4);
    keys(&mut app, "Job");
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('z'));

    assert_eq!(
        app.contexts.names().collect::<Vec<_>>(),
        vec!["Home", "Job", "Work"]
    );
    assert!(app.contexts.contains(app.contexts.current()));
    assert_eq!(app.store.get(TaskId(1)).unwrap().context, "Work");
    assert_eq!(app.cursor, VisualIndex(0));
}

#[test]
fn deleting_a_context_cascades() {
    let mut app = start(&[
        (1, "a", "Work"),
        (2, "b", "Home"),
        (3, "c", "Work"),
        (4, "d", "Garden"),
    ]);
    press(&mut app, KeyCode::Char('D'));
    keys(&mut app, "Y");
    press(&mut app, KeyCode::Enter);

    assert_eq!(ids(&app), vec![2, 4]);
    assert_eq!(app.contexts.names().collect::<Vec<_>>(), vec!["Garden", "Home"]);
    assert_eq!(app.contexts.current(), "Garden");
    assert_eq!(app.cursor, VisualIndex(0));
}

#[test]
fn declining_context_delete_keeps_everything() {
    let mut app = start(&[(1, "a", "Work"), (2, "b", "Home")]);
    press(&mut app, KeyCode::Char('D'));
    keys(&mut app, "n");
    press(&mut app, KeyCode::Enter);
    assert_eq!(ids(&app), vec![1, 2]);
    assert!(app.history.is_empty());
}

#[test]
fn rename_reaches_exactly_the_matching_tasks() {
    let mut app = start(&[
        (1, "a", "Work"),
        (2, "b", "Home"),
        (3, "c", "Work"),
        (4, "d", "Home"),
        (5, "e", "Work"),
    ]);
    press(&mut app, KeyCode::Char('r'));
    clear_field(&mut app, 4);
    keys(&mut app, "Job");
    press(&mut app, KeyCode::Enter);

    let contexts: Vec<&str> = app.store.tasks().iter().map(|t| t.context.as_str()).collect();
    assert_eq!(contexts, vec!["Job", "Home", "Job", "Home", "Job"]);
    assert!(app.contexts.contains("Job"));
    assert!(!app.contexts.contains("Work"));
    assert_eq!(app.contexts.current(), "Job");
}

#[test]
fn priority_cycles_back_to_none() {
    let mut app = start(&[(1, "a", "Work")]);
    let seen: Vec<Priority> = (0..4)
        .map(|_| {
            press(&mut app, KeyCode::Char('p'));
            app.store.get(TaskId(1)).unwrap().priority
        })
        .collect();
    assert_eq!(
        seen,
        vec![Priority::Low, Priority::Medium, Priority::High, Priority::None]
    );
}

#[test]
fn corrupt_priority_cycles_to_low() {
    let raw = r#"{"tasks":[{"id":1,"task":"a","context":"Work","priority":"urgent!!"}]}"#;
    let loaded: TodoState = serde_json::from_str(raw).unwrap();
    let mut app = App::new(loaded, &AppConfig::default());
    press(&mut app, KeyCode::Char('p'));
    assert_eq!(app.store.get(TaskId(1)).unwrap().priority, Priority::Low);
}

#[test]
fn due_date_dialog_sets_and_validates() {
    let mut app = start(&[(1, "a", "Work")]);

    press(&mut app, KeyCode::Char('u'));
    clear_field(&mut app, 2);
    keys(&mut app, "5");
    press(&mut app, KeyCode::Tab);
    clear_field(&mut app, 2);
    keys(&mut app, "3");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.store.get(TaskId(1)).unwrap().due_label().as_deref(),
        Some("2024-03-05")
    );

    // Month 13 never reaches the task
    press(&mut app, KeyCode::Char('u'));
    press(&mut app, KeyCode::Tab);
    clear_field(&mut app, 2);
    keys(&mut app, "13");
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.message.as_deref(),
        Some("Invalid date format. Use YYYY-MM-DD")
    );
    assert_eq!(
        app.store.get(TaskId(1)).unwrap().due_label().as_deref(),
        Some("2024-03-05")
    );
    assert_eq!(app.history.len(), 1);

    press(&mut app, KeyCode::Char('U'));
    assert_eq!(app.store.get(TaskId(1)).unwrap().due_date, None);
}

#[test]
fn history_is_bounded_fifo() {
    let mut config = AppConfig::default();
    config.history.max_depth = 3;
    let mut app = App::new(state(&[(1, "a", "Work")]), &config);
    for _ in 0..5 {
        press(&mut app, KeyCode::Char(' '));
    }
    assert_eq!(app.history.len(), 3);

    // Three undos walk back to the state after the second toggle
    for _ in 0..3 {
        press(&mut app, KeyCode::Char('z'));
    }
    assert!(!app.store.get(TaskId(1)).unwrap().checked);
    press(&mut app, KeyCode::Char('z'));
    assert_eq!(app.message.as_deref(), Some("Nothing to undo"));
}

#[test]
fn empty_view_is_safe() {
    let mut app = start(&[(1, "a", "Home")]);
    assert!(app.view().is_empty());
    assert!(app.current_task().is_none());

    for code in [
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Char(' '),
        KeyCode::Char('d'),
        KeyCode::Char('e'),
        KeyCode::Char('m'),
        KeyCode::Char('p'),
    ] {
        let effects = press(&mut app, code);
        assert!(effects.is_empty(), "{:?} produced {:?}", code, effects);
        assert_eq!(app.cursor, VisualIndex(0));
    }
    assert_eq!(ids(&app), vec![1]);
}

#[test]
fn quit_is_an_effect() {
    let mut app = start(&[]);
    assert_eq!(press(&mut app, KeyCode::Char('q')), vec![Effect::Quit]);
}
