//! The filtered, ordered projection of the master list for one context.
//!
//! A view is rebuilt from the store whenever it is needed and is thrown away
//! afterwards. Positions in it are [`VisualIndex`] values, which the store
//! never accepts directly: acting on a row always goes through
//! [`FilteredView::resolve`] to get a [`TaskId`] first.

use crate::model::TaskId;

use super::task_store::TaskStore;

/// A row position in a filtered view (the cursor lives here)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VisualIndex(pub usize);

/// Direction of an adjacent move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Ids of the tasks in one context, in master-list order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilteredView {
    ids: Vec<TaskId>,
}

impl FilteredView {
    /// Linear scan of the master list, keeping tasks whose context matches.
    pub fn of(store: &TaskStore, context: &str) -> Self {
        FilteredView {
            ids: store.tasks_in(context).map(|t| t.id).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.ids
    }

    /// Map a row to the identity of the task shown there
    pub fn resolve(&self, at: VisualIndex) -> Option<TaskId> {
        self.ids.get(at.0).copied()
    }

    pub fn position_of(&self, id: TaskId) -> Option<VisualIndex> {
        self.ids.iter().position(|&i| i == id).map(VisualIndex)
    }

    pub fn last(&self) -> Option<VisualIndex> {
        self.ids.len().checked_sub(1).map(VisualIndex)
    }

    /// Re-clamp a cursor after a structural change: past-the-end snaps to the
    /// last row, an empty view pins it to 0.
    pub fn clamp(&self, cursor: VisualIndex) -> VisualIndex {
        match self.last() {
            Some(last) if cursor > last => last,
            Some(_) => cursor,
            None => VisualIndex(0),
        }
    }

    /// Cursor movement with wraparound. Empty views leave the cursor alone.
    pub fn step(&self, cursor: VisualIndex, dir: Direction) -> VisualIndex {
        let n = self.ids.len();
        if n == 0 {
            return cursor;
        }
        let at = cursor.0.min(n - 1);
        match dir {
            Direction::Up => VisualIndex((at + n - 1) % n),
            Direction::Down => VisualIndex((at + 1) % n),
        }
    }

    /// The adjacent row in `dir`, without wraparound
    pub fn neighbour(&self, at: VisualIndex, dir: Direction) -> Option<VisualIndex> {
        let target = match dir {
            Direction::Up => at.0.checked_sub(1)?,
            Direction::Down => at.0 + 1,
        };
        (target < self.ids.len()).then_some(VisualIndex(target))
    }
}
