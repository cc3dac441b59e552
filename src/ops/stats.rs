use chrono::NaiveDate;
use serde::Serialize;

use super::contexts::ContextRegistry;
use super::task_store::TaskStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContextStats {
    pub name: String,
    pub total: usize,
    pub completed: usize,
}

impl ContextStats {
    pub fn completion_rate(&self) -> f64 {
        rate(self.completed, self.total)
    }
}

/// Totals for the stats view and `ctodo stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    pub contexts: Vec<ContextStats>,
}

impl Stats {
    pub fn completion_rate(&self) -> f64 {
        rate(self.completed, self.total)
    }
}

fn rate(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

/// Compute overall and per-context completion, in registry order
pub fn compute(store: &TaskStore, contexts: &ContextRegistry, today: NaiveDate) -> Stats {
    let tasks = store.tasks();
    Stats {
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.checked).count(),
        overdue: tasks.iter().filter(|t| t.is_overdue(today)).count(),
        contexts: contexts
            .names()
            .map(|name| {
                let (total, completed) = store
                    .tasks_in(name)
                    .fold((0, 0), |(n, c), t| (n + 1, c + usize::from(t.checked)));
                ContextStats {
                    name: name.to_string(),
                    total,
                    completed,
                }
            })
            .collect(),
    }
}
