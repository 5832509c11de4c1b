//! Core data types for tasktable.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A tracked task as stored in the `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Row id assigned by SQLite
    pub id: i64,

    /// Short description of the work
    pub title: String,

    /// Optional longer description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-text time estimate ("2h", "half a day")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Category name, copied by value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub priority: Priority,

    /// Epoch seconds, set once at insert
    pub created: i64,

    pub done: bool,
}

impl Task {
    /// The editable part of this task, used to prefill an edit form.
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            time: self.time.clone(),
            category: self.category.clone(),
            priority: self.priority,
        }
    }
}

/// Convert epoch seconds to local time, falling back to the epoch for out-of-range values.
fn local_time(epoch_secs: i64) -> DateTime<Local> {
    Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local))
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM` in local time.
pub fn format_created(epoch_secs: i64) -> String {
    local_time(epoch_secs).format("%Y-%m-%d %H:%M").to_string()
}

/// The mutable fields of a task: everything except id, created and done.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub priority: Priority,
}

impl TaskFields {
    /// Create fields with just a title and the default priority.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            time: None,
            category: None,
            priority: Priority::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the time estimate.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Validate the fields before they reach the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Task priority. Stored as the literal strings `high`, `medium` and `low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities in form order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// The literal stored in the `priority` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

/// A named tag offered when filling in a task's category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Validation errors for user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyCategory,
    InvalidPriority(String),
    InvalidPage,
    InvalidPageSize,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::EmptyCategory => write!(f, "category name cannot be empty"),
            ValidationError::InvalidPriority(p) => {
                write!(f, "invalid priority '{}': must be high, medium or low", p)
            }
            ValidationError::InvalidPage => write!(f, "page numbers start at 1"),
            ValidationError::InvalidPageSize => write!(f, "page size must be at least 1"),
        }
    }
}

impl std::error::Error for ValidationError {}
