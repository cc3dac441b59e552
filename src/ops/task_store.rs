use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{Priority, Task, TaskId};

use super::OpError;
use super::view::{Direction, FilteredView, VisualIndex};

/// Case-insensitive input that removes a due date
pub const CLEAR_SENTINEL: &str = "clear";

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static pattern"));

/// Parse a strict `YYYY-MM-DD` date that names a real calendar day.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, OpError> {
    if !DATE_SHAPE.is_match(input) {
        return Err(OpError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| OpError::InvalidDate(input.to_string()))
}

/// Owner of the master task list. Tasks are addressed by [`TaskId`] only;
/// positions in the master list never leave this type.
///
/// Mutators return `false` (or `None`) when nothing changed, which includes
/// the stale-id case: an id that is no longer present is a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl TaskStore {
    /// Build a store from persisted parts. The counter is bumped past every
    /// existing id so a hand-edited file can't cause id reuse.
    pub fn from_parts(tasks: Vec<Task>, next_id: u64) -> Self {
        let floor = tasks
            .iter()
            .map(|t| t.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        TaskStore {
            tasks,
            next_id: next_id.max(floor),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks of one context in master-list order
    pub fn tasks_in<'a>(&'a self, context: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.context == context)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new task. Empty text is rejected, as is any add once the
    /// id counter is exhausted.
    pub fn add(&mut self, text: &str, context: &str) -> Option<TaskId> {
        if text.is_empty() {
            return None;
        }
        let Some(next) = self.next_id.checked_add(1) else {
            tracing::warn!("task id counter exhausted");
            return None;
        };
        let id = TaskId(self.next_id);
        self.next_id = next;
        self.tasks.push(Task::new(id, text, context));
        Some(id)
    }

    pub fn edit(&mut self, id: TaskId, text: &str) -> bool {
        match self.get_mut(id) {
            Some(task) if task.text != text => {
                task.text = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn toggle_checked(&mut self, id: TaskId) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.checked = !task.checked;
                true
            }
            None => false,
        }
    }

    pub fn cycle_priority(&mut self, id: TaskId) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.priority = task.priority.next();
                true
            }
            None => false,
        }
    }

    pub fn set_priority(&mut self, id: TaskId, priority: Priority) -> bool {
        match self.get_mut(id) {
            Some(task) if task.priority != priority => {
                task.priority = priority;
                true
            }
            _ => false,
        }
    }

    /// Set or clear a due date. The input is validated before the task is
    /// touched, so a malformed date never mutates anything.
    pub fn set_due_date(&mut self, id: TaskId, input: &str) -> Result<bool, OpError> {
        let new_date = if input.eq_ignore_ascii_case(CLEAR_SENTINEL) {
            None
        } else if input.is_empty() {
            return Ok(false);
        } else {
            Some(parse_due_date(input)?)
        };
        match self.get_mut(id) {
            Some(task) if task.due_date != new_date => {
                task.due_date = new_date;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Set-union semantics: a tag already on the task is a no-op.
    pub fn add_tag(&mut self, id: TaskId, tag: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => task.tags.insert(tag.to_string()),
            None => false,
        }
    }

    /// Drop the tags at the given positions, keeping survivors in order.
    pub fn remove_tags(&mut self, id: TaskId, indices: &[usize]) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        let before = task.tags.len();
        task.tags = task
            .tags
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, tag)| tag.clone())
            .collect();
        task.tags.len() != before
    }

    /// Stable removal: the relative order of the remaining tasks is kept.
    pub fn delete(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.position(id)?;
        Some(self.tasks.remove(idx))
    }

    /// Swap the task at `at` in `view` with its neighbour in `dir`. The swap
    /// happens between the two tasks' master-list positions, so the new order
    /// survives the view being rebuilt. Returns the moved task's new row.
    pub fn swap_adjacent(
        &mut self,
        view: &FilteredView,
        at: VisualIndex,
        dir: Direction,
    ) -> Option<VisualIndex> {
        let target = view.neighbour(at, dir)?;
        let moving = self.position(view.resolve(at)?)?;
        let other = self.position(view.resolve(target)?)?;
        self.tasks.swap(moving, other);
        Some(target)
    }

    /// Cascade half of a context delete. Returns how many tasks went away.
    pub fn remove_context(&mut self, context: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.context != context);
        before - self.tasks.len()
    }

    /// Repoint every task of `old` at `new`. Returns how many were changed.
    pub fn rename_context(&mut self, old: &str, new: &str) -> usize {
        let mut changed = 0;
        for task in self.tasks.iter_mut().filter(|t| t.context == old) {
            task.context = new.to_string();
            changed += 1;
        }
        changed
    }

    /// Deep copy of the master list, tag sets included
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Replace the master list wholesale (undo). The id counter is left
    /// alone so ids handed out after the snapshot are never reissued.
    pub fn restore(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }
}
