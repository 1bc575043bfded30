use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

/// Colour preselected by the project form.
pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Opaque task identifier, e.g. `task-1` or `task-0192...`.
    TaskId
);
entity_id!(
    /// Opaque project identifier.
    ProjectId
);
entity_id!(
    /// Opaque tag identifier.
    TagId
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort weight: high 3, medium 2, low 1.
    pub fn weight(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Todo => write!(f, "todo"),
            Status::InProgress => write!(f, "in-progress"),
            Status::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in-progress" | "in_progress" | "inprogress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub color: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub project_id: ProjectId,
    pub tags: Vec<TagId>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Calendar date of the due date in `tz`, time of day stripped.
    pub fn local_due_date(&self, tz: &Tz) -> Option<NaiveDate> {
        self.due_date
            .map(|due| due.with_timezone(tz).date_naive())
    }

    /// Not completed and due on a calendar day before `today`.
    pub fn is_overdue(&self, today: NaiveDate, tz: &Tz) -> bool {
        if self.is_completed() {
            return false;
        }
        matches!(self.local_due_date(tz), Some(due) if due < today)
    }

    pub fn is_due_on(&self, day: NaiveDate, tz: &Tz) -> bool {
        self.local_due_date(tz) == Some(day)
    }

    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.contains(tag_id)
    }
}

/// Collapses repeated tag ids, keeping the first occurrence of each.
pub(crate) fn dedup_tags(tags: Vec<TagId>) -> Vec<TagId> {
    let mut unique: Vec<TagId> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Fields for a new task; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<DateTime<Utc>>,
    pub project_id: ProjectId,
    pub tags: Vec<TagId>,
}

impl NewTaskData {
    pub fn new(title: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            project_id,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("Title", &self.title)
    }
}

/// Partial task update. `None` leaves a field untouched; for `due_date`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub project_id: Option<ProjectId>,
    pub tags: Option<Vec<TagId>>,
}

impl UpdateTaskData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.title {
            Some(title) => require_text("Title", title),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(tags) = self.tags {
            task.tags = dedup_tags(tags);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProjectData {
    pub name: String,
    pub color: String,
    pub description: String,
}

impl NewProjectData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: DEFAULT_PROJECT_COLOR.to_string(),
            description: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("Project name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProjectData {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

impl UpdateProjectData {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.name {
            Some(name) => require_text("Project name", name),
            None => Ok(()),
        }
    }

    pub(crate) fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
    }
}

/// Outcome of a project delete: the removed project and how many tasks went with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRemoval {
    pub project: Project,
    pub removed_tasks: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub overdue: usize,
}

impl TaskStats {
    /// Rounded percentage of completed tasks; 0 for an empty collection.
    pub fn completion_rate(&self) -> u32 {
        self.share_of(self.completed)
    }

    /// `round(100 * count / total)`, 0 when there are no tasks.
    pub fn share_of(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let count = count as u64;
        let total = self.total as u64;
        ((200 * count + total) / (2 * total)) as u32
    }
}
