pub mod contexts;
pub mod stats;
pub mod task_store;
pub mod view;

pub use contexts::ContextRegistry;
pub use task_store::TaskStore;
pub use view::{FilteredView, VisualIndex};

/// Recoverable conditions reported to the user. None of these leave a
/// partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpError {
    #[error("Context already exists")]
    DuplicateContext(String),
    #[error("Context name already exists")]
    ContextNameTaken(String),
    #[error("Cannot delete the only context")]
    LastContext,
    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No tags to remove")]
    NoTags,
    #[error("Nothing to undo")]
    NothingToUndo,
}
