use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Stable task identity. Assigned once from the store's counter and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task priority, cycled none → low → medium → high → none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn next(self) -> Self {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Priority::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Exclamation marks shown before the task text
    pub fn marker(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "!",
            Priority::Medium => "!!",
            Priority::High => "!!!",
        }
    }
}

/// Unrecognized values (hand-edited or corrupt state files) load as `None`.
impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::None,
        }
    }
}

impl From<Priority> for String {
    fn from(p: Priority) -> Self {
        p.as_str().to_string()
    }
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "task")]
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    /// Name of the owning context
    pub context: String,
    #[serde(default, skip_serializing_if = "Priority::is_none")]
    pub priority: Priority,
    /// Insertion-ordered, duplicate-free
    #[serde(default, skip_serializing_if = "IndexSet::is_empty")]
    pub tags: IndexSet<String>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

/// A malformed date drops just the date rather than failing the whole file.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(value = %s, error = %e, "ignoring unparseable due date");
            None
        }
    }))
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, context: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            context: context.into(),
            ..Default::default()
        }
    }

    /// Due date formatted as `YYYY-MM-DD`
    pub fn due_label(&self) -> Option<String> {
        self.due_date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.checked && self.due_date.is_some_and(|d| d < today)
    }
}
