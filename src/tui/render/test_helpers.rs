use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{AppConfig, Priority, Task, TaskId, TodoState};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Fixed "today" so overdue styling is deterministic
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Two contexts: Work has three tasks (one done, one tagged and due),
/// Home has one.
pub fn sample_app() -> App {
    let mut pay = Task::new(TaskId(2), "Pay invoices", "Work");
    pay.priority = Priority::High;
    pay.tags.insert("finance".into());
    pay.due_date = NaiveDate::from_ymd_opt(2024, 5, 20);
    let mut done = Task::new(TaskId(3), "Ship release", "Work");
    done.checked = true;

    let state = TodoState {
        tasks: vec![
            Task::new(TaskId(1), "Write report", "Work"),
            Task::new(TaskId(4), "Water plants", "Home"),
            pay,
            done,
        ],
        contexts: vec!["Home".into(), "Work".into()],
        current_context: "Work".into(),
        next_id: 5,
    };
    let mut app = App::new(state, &AppConfig::default());
    app.today = today();
    app
}
