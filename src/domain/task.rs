use crate::domain::board::ColumnId;
use crate::error::{KanbanError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task (e.g., task-1, task-2, task-100)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct TaskId(String);

impl TaskId {
    const DEFAULT_PREFIX: &'static str = "task-";

    /// Creates a new TaskId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}", Self::DEFAULT_PREFIX, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KanbanError::InvalidTaskId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = KanbanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a task, ordered from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Urgent => write!(f, "Urgent"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|priority| priority.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<String> =
                    Self::ALL.iter().map(|p| p.to_string().to_lowercase()).collect();
                format!(
                    "Invalid priority '{}'. Valid priorities: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}

/// A kanban task
///
/// A task does not know its position; the containing column's sequence is
/// the only ordering. `status` always names that column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task in the given column, stamped with the current time
    pub fn new(id: TaskId, title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status,
            priority: None,
            assignee: None,
            tags: Vec::new(),
            created_at: Utc::now(),
            due_date: None,
        }
    }

    /// Checks if the due date has passed as of `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    /// Checks if the task carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Adds a tag unless it is blank or already present.
    ///
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes every occurrence of `tag`; returns whether anything was removed
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

/// Payload for creating a task, as submitted by the task form.
///
/// Priority starts at [`Priority::Medium`], like a fresh form; set the field
/// to `None` (or send JSON `null`) for a task without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_draft_priority")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

fn default_draft_priority() -> Option<Priority> {
    Some(Priority::Medium)
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: None,
            priority: default_draft_priority(),
            assignee: None,
            tags: Vec::new(),
            due_date: None,
        }
    }
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Requests a specific id instead of a generated one
    #[must_use]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Normalizes the form input into a task record
    pub(crate) fn into_task(
        self,
        id: TaskId,
        status: ColumnId,
        created_at: DateTime<Utc>,
    ) -> Result<Task> {
        Ok(Task {
            id,
            title: normalize_title(&self.title)?,
            description: normalize_text(self.description),
            status,
            priority: self.priority,
            assignee: normalize_text(self.assignee),
            tags: normalize_tags(self.tags),
            created_at,
            due_date: self.due_date,
        })
    }
}

/// Partial update to an existing task
///
/// Each field left as `None` keeps the current value. Clearable fields use a
/// nested option: `Some(None)` (or JSON `null`) clears the value. Unknown
/// fields are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub status: Option<ColumnId>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(Some(priority));
        self
    }

    #[must_use]
    pub fn clear_priority(mut self) -> Self {
        self.priority = Some(None);
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(Some(assignee.into()));
        self
    }

    #[must_use]
    pub fn clear_assignee(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ColumnId) -> Self {
        self.status = Some(status);
        self
    }

    /// Checks if the update would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns a copy of `task` with this update merged in.
    ///
    /// `id` and `created_at` are never touched. The caller is responsible for
    /// checking that a new `status` names a real column.
    pub(crate) fn apply_to(&self, task: &Task) -> Result<Task> {
        let mut updated = task.clone();

        if let Some(title) = &self.title {
            updated.title = normalize_title(title)?;
        }
        if let Some(description) = &self.description {
            updated.description = normalize_text(description.clone());
        }
        if let Some(priority) = self.priority {
            updated.priority = priority;
        }
        if let Some(assignee) = &self.assignee {
            updated.assignee = normalize_text(assignee.clone());
        }
        if let Some(tags) = &self.tags {
            updated.tags = normalize_tags(tags.clone());
        }
        if let Some(due_date) = self.due_date {
            updated.due_date = due_date;
        }
        if let Some(status) = &self.status {
            updated.status = status.clone();
        }

        Ok(updated)
    }
}

fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn normalize_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(KanbanError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Trims free text; blank input becomes absent
fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Trims tags, drops blanks, and keeps the first occurrence of duplicates
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
