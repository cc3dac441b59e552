use serde::{Deserialize, Serialize};

use super::task::Task;

/// Context used when nothing else is known (fresh install, unreadable state,
/// or a reconciliation pass that finds no names at all).
pub const DEFAULT_CONTEXT: &str = "Work";

/// The persisted aggregate handed to and from the state file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default)]
    pub current_context: String,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

fn first_id() -> u64 {
    1
}

impl Default for TodoState {
    fn default() -> Self {
        TodoState {
            tasks: Vec::new(),
            contexts: vec![DEFAULT_CONTEXT.to_string()],
            current_context: DEFAULT_CONTEXT.to_string(),
            next_id: 1,
        }
    }
}
