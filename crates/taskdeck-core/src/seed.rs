//! Built-in sample dataset loaded by [`InMemoryRepository::seeded`].
//!
//! Due dates and creation times are relative to the clock's "now", so the
//! dashboard always has something due today, tomorrow and later.
//!
//! [`InMemoryRepository::seeded`]: crate::repository::InMemoryRepository::seeded

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::models::{Priority, Project, ProjectId, Status, Tag, TagId, Task, TaskId};

#[derive(Debug, Clone)]
pub struct SeedData {
    pub projects: Vec<Project>,
    pub tags: Vec<Tag>,
    pub tasks: Vec<Task>,
}

const PROJECTS: [(&str, &str, &str, &str); 4] = [
    ("project-1", "Personal", "#3b82f6", "Personal tasks and errands"),
    ("project-2", "Work", "#10b981", "Work-related tasks and deadlines"),
    ("project-3", "Health", "#8b5cf6", "Health and fitness goals"),
    ("project-4", "Learning", "#f59e0b", "Learning new skills and topics"),
];

const TAGS: [(&str, &str, &str); 5] = [
    ("tag-1", "Urgent", "#ef4444"),
    ("tag-2", "Quick", "#3b82f6"),
    ("tag-3", "Blocked", "#f59e0b"),
    ("tag-4", "Important", "#8b5cf6"),
    ("tag-5", "Research", "#14b8a6"),
];

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: Priority,
    status: Status,
    due_in_days: i64,
    created_days_ago: i64,
    project: &'static str,
    tags: &'static [&'static str],
}

const TASKS: [SeedTask; 10] = [
    SeedTask {
        id: "task-1",
        title: "Complete project proposal",
        description: "Write and submit the project proposal for the new client",
        priority: Priority::High,
        status: Status::InProgress,
        due_in_days: 2,
        created_days_ago: 5,
        project: "project-2",
        tags: &["tag-4"],
    },
    SeedTask {
        id: "task-2",
        title: "Morning run",
        description: "30 minute morning run at the park",
        priority: Priority::Medium,
        status: Status::Todo,
        due_in_days: 0,
        created_days_ago: 2,
        project: "project-3",
        tags: &["tag-2"],
    },
    SeedTask {
        id: "task-3",
        title: "Grocery shopping",
        description: "Buy groceries for the week",
        priority: Priority::Low,
        status: Status::Completed,
        due_in_days: -1,
        created_days_ago: 3,
        project: "project-1",
        tags: &["tag-2"],
    },
    SeedTask {
        id: "task-4",
        title: "Learn React hooks",
        description: "Complete the advanced React hooks tutorial",
        priority: Priority::Medium,
        status: Status::Todo,
        due_in_days: 5,
        created_days_ago: 1,
        project: "project-4",
        tags: &["tag-5"],
    },
    SeedTask {
        id: "task-5",
        title: "Team meeting",
        description: "Weekly team sync meeting",
        priority: Priority::High,
        status: Status::Todo,
        due_in_days: 1,
        created_days_ago: 1,
        project: "project-2",
        tags: &["tag-4"],
    },
    SeedTask {
        id: "task-6",
        title: "Update resume",
        description: "Update resume with recent projects",
        priority: Priority::Low,
        status: Status::Todo,
        due_in_days: 10,
        created_days_ago: 7,
        project: "project-1",
        tags: &[],
    },
    SeedTask {
        id: "task-7",
        title: "Fix website bug",
        description: "Debug and fix the login issue on the website",
        priority: Priority::High,
        status: Status::InProgress,
        due_in_days: 0,
        created_days_ago: 2,
        project: "project-2",
        tags: &["tag-1", "tag-3"],
    },
    SeedTask {
        id: "task-8",
        title: "Meditation session",
        description: "15-minute guided meditation",
        priority: Priority::Medium,
        status: Status::Todo,
        due_in_days: 0,
        created_days_ago: 1,
        project: "project-3",
        tags: &["tag-2"],
    },
    SeedTask {
        id: "task-9",
        title: "Read design book",
        description: "Read 2 chapters of the UX design book",
        priority: Priority::Medium,
        status: Status::InProgress,
        due_in_days: 7,
        created_days_ago: 10,
        project: "project-4",
        tags: &["tag-5"],
    },
    SeedTask {
        id: "task-10",
        title: "Plan vacation",
        description: "Research destinations and create itinerary",
        priority: Priority::Low,
        status: Status::Todo,
        due_in_days: 20,
        created_days_ago: 5,
        project: "project-1",
        tags: &["tag-5"],
    },
];

impl SeedTask {
    fn build(&self, now: DateTime<Utc>) -> Task {
        Task {
            id: TaskId::from(self.id),
            title: self.title.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            status: self.status,
            due_date: Some(now + Duration::days(self.due_in_days)),
            created_at: now - Duration::days(self.created_days_ago),
            project_id: ProjectId::from(self.project),
            tags: self.tags.iter().map(|tag| TagId::from(*tag)).collect(),
        }
    }
}

pub fn sample_data(clock: &impl Clock) -> SeedData {
    let now = clock.now();

    let projects = PROJECTS
        .iter()
        .map(|(id, name, color, description)| Project {
            id: ProjectId::from(*id),
            name: name.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        })
        .collect();

    let tags = TAGS
        .iter()
        .map(|(id, name, color)| Tag {
            id: TagId::from(*id),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect();

    let tasks = TASKS.iter().map(|task| task.build(now)).collect();

    SeedData {
        projects,
        tags,
        tasks,
    }
}
