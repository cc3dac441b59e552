use serde::Serialize;

use crate::model::Task;
use crate::ops::stats::Stats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub text: String,
    pub checked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub context: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ContextInfoJson {
    pub name: String,
    pub current: bool,
    pub open: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: u64,
    pub context: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        text: task.text.clone(),
        checked: task.checked,
        priority: (!task.priority.is_none()).then(|| task.priority.as_str().to_string()),
        tags: task.tags.iter().cloned().collect(),
        due_date: task.due_label(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// One-line summary: `[x] 3 !! Pay invoices #finance (due 2024-05-20)`
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.checked { 'x' } else { ' ' };
    let mut line = format!("[{}] {} ", mark, task.id);
    let marker = task.priority.marker();
    if !marker.is_empty() {
        line.push_str(marker);
        line.push(' ');
    }
    line.push_str(&task.text);
    for tag in &task.tags {
        line.push_str(&format!(" #{}", tag));
    }
    if let Some(due) = task.due_label() {
        line.push_str(&format!(" (due {})", due));
    }
    line
}

pub fn format_context_header(name: &str) -> String {
    format!("== {} ==", name)
}

pub fn format_context_info(info: &ContextInfoJson, name_width: usize) -> String {
    let marker = if info.current { '*' } else { ' ' };
    format!(
        "{} {:<width$}  {} open / {} total",
        marker,
        info.name,
        info.open,
        info.total,
        width = name_width
    )
}

pub fn format_stats(stats: &Stats) -> Vec<String> {
    let mut lines = vec![
        format!("Total:     {}", stats.total),
        format!(
            "Completed: {} ({:.1}%)",
            stats.completed,
            stats.completion_rate()
        ),
        format!("Overdue:   {}", stats.overdue),
    ];
    if !stats.contexts.is_empty() {
        lines.push(String::new());
        let name_w = stats
            .contexts
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for ctx in &stats.contexts {
            lines.push(format!(
                "  {:<width$}  {}/{} ({:.1}%)",
                ctx.name,
                ctx.completed,
                ctx.total,
                ctx.completion_rate(),
                width = name_w
            ));
        }
    }
    lines
}
