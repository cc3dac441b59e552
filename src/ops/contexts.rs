use std::collections::BTreeSet;

use crate::model::DEFAULT_CONTEXT;

use super::OpError;
use super::task_store::TaskStore;

/// The set of context names plus the "current" pointer.
///
/// Names are kept sorted so cycling and fallback order are deterministic.
/// Tasks refer to contexts by name; the registry tolerates drift against the
/// task list and [`ContextRegistry::synchronize`] repairs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRegistry {
    names: BTreeSet<String>,
    current: String,
}

impl Default for ContextRegistry {
    fn default() -> Self {
        ContextRegistry {
            names: BTreeSet::from([DEFAULT_CONTEXT.to_string()]),
            current: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl ContextRegistry {
    /// Build from persisted parts. Call [`Self::synchronize`] before use.
    pub fn from_parts(names: impl IntoIterator<Item = String>, current: String) -> Self {
        ContextRegistry {
            names: names.into_iter().collect(),
            current,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Position of the current context in display order
    pub fn current_index(&self) -> Option<usize> {
        self.names.iter().position(|n| *n == self.current)
    }

    /// Register a new context and make it current.
    pub fn add(&mut self, name: &str) -> Result<(), OpError> {
        if self.names.contains(name) {
            return Err(OpError::DuplicateContext(name.to_string()));
        }
        self.names.insert(name.to_string());
        self.current = name.to_string();
        Ok(())
    }

    /// Rename the current context and every task that belongs to it.
    /// Returns `Ok(false)` when the name is unchanged.
    pub fn rename(&mut self, new_name: &str, store: &mut TaskStore) -> Result<bool, OpError> {
        if new_name == self.current {
            return Ok(false);
        }
        if self.names.contains(new_name) {
            return Err(OpError::ContextNameTaken(new_name.to_string()));
        }
        let old = std::mem::replace(&mut self.current, new_name.to_string());
        self.names.remove(&old);
        self.names.insert(new_name.to_string());
        store.rename_context(&old, new_name);
        Ok(true)
    }

    /// Delete the current context together with all of its tasks, then fall
    /// back to the first remaining context. Returns the number of tasks removed.
    pub fn delete(&mut self, store: &mut TaskStore) -> Result<usize, OpError> {
        if self.names.len() <= 1 {
            return Err(OpError::LastContext);
        }
        let removed = store.remove_context(&self.current);
        self.names.remove(&self.current);
        self.current = self.first().unwrap_or(DEFAULT_CONTEXT).to_string();
        Ok(removed)
    }

    /// Rebuild the registry as the union of its names and every context
    /// referenced by a task, and make sure `current` names a member.
    pub fn synchronize(&mut self, store: &TaskStore) {
        self.names
            .extend(store.tasks().iter().map(|t| t.context.clone()));
        if self.names.is_empty() {
            self.names.insert(DEFAULT_CONTEXT.to_string());
            self.current = DEFAULT_CONTEXT.to_string();
            return;
        }
        if !self.names.contains(&self.current) {
            self.current = self.first().unwrap_or(DEFAULT_CONTEXT).to_string();
        }
    }

    pub fn cycle_next(&mut self) {
        self.cycle(1);
    }

    pub fn cycle_previous(&mut self) {
        self.cycle(self.names.len().saturating_sub(1));
    }

    fn cycle(&mut self, step: usize) {
        let n = self.names.len();
        if n == 0 {
            return;
        }
        let at = self.current_index().unwrap_or(0);
        if let Some(name) = self.names.iter().nth((at + step) % n) {
            self.current = name.clone();
        }
    }

    fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}
