use crate::clock::{Clock, SystemClock, Today};
use crate::error::CoreError;
use crate::models::{
    NewProjectData, NewTaskData, Priority, Project, ProjectId, ProjectRemoval, Status, Tag, TagId,
    Task, TaskId, UpdateProjectData, UpdateTaskData,
};
use crate::query::Query;
use crate::seed;
use uuid::Uuid;

pub mod projects;
pub mod tags;
pub mod tasks;

/// Domain-specific trait for task operations
pub trait TaskRepository {
    /// Stores a new task with a fresh id and `created_at` of now.
    fn add_task(&mut self, data: NewTaskData) -> Task;
    /// Shallow-merges `data` onto the task. `None` when the id is unknown.
    fn update_task(&mut self, id: &TaskId, data: UpdateTaskData) -> Option<Task>;
    fn delete_task(&mut self, id: &TaskId) -> Option<Task>;
    /// Completed tasks go back to todo, anything else becomes completed.
    fn toggle_task_completion(&mut self, id: &TaskId) -> Option<Task>;

    fn tasks(&self) -> &[Task];
    fn get_task(&self, id: &TaskId) -> Option<&Task>;
    fn get_tasks_by_project(&self, project_id: &ProjectId) -> Vec<&Task>;
    fn get_tasks_by_status(&self, status: Status) -> Vec<&Task>;
    fn get_tasks_by_priority(&self, priority: Priority) -> Vec<&Task>;
    fn get_tasks_by_tag(&self, tag_id: &TagId) -> Vec<&Task>;
    fn get_overdue_tasks(&self) -> Vec<&Task>;
    fn get_tasks_due_today(&self) -> Vec<&Task>;
    fn find_tasks(&self, query: &Query) -> Vec<&Task>;
}

/// Domain-specific trait for project operations
pub trait ProjectRepository {
    fn add_project(&mut self, data: NewProjectData) -> Project;
    fn update_project(&mut self, id: &ProjectId, data: UpdateProjectData) -> Option<Project>;
    /// Removes the project together with every task that belongs to it.
    fn delete_project(&mut self, id: &ProjectId) -> Option<ProjectRemoval>;

    fn projects(&self) -> &[Project];
    fn get_project(&self, id: &ProjectId) -> Option<&Project>;
    fn ensure_project_exists(&self, id: &ProjectId) -> Result<&Project, CoreError>;
}

/// Tags are seeded at startup and are read-only afterwards.
pub trait TagRepository {
    fn tags(&self) -> &[Tag];
    fn get_tag(&self, id: &TagId) -> Option<&Tag>;
    /// The task's tags that exist, in the task's order. Dangling ids are skipped.
    fn resolve_tags(&self, task: &Task) -> Vec<&Tag>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: TaskRepository + ProjectRepository + TagRepository {
    /// The local calendar day that overdue and due-today checks compare against.
    fn today(&self) -> Today;
}

/// In-memory implementation of the repository pattern.
///
/// Collections keep insertion order. All mutations take `&mut self`, so a
/// reader can never observe a half-applied change such as a project removed
/// while its tasks are still present.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<C = SystemClock> {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    tags: Vec<Tag>,
    clock: C,
}

impl<C: Clock> InMemoryRepository<C> {
    pub fn new(clock: C) -> Self {
        Self::with_data(clock, Vec::new(), Vec::new(), Vec::new())
    }

    /// Store preloaded with the built-in sample projects, tags and tasks.
    pub fn seeded(clock: C) -> Self {
        let data = seed::sample_data(&clock);
        log::info!(
            "Seeded store with {} projects, {} tags, {} tasks",
            data.projects.len(),
            data.tags.len(),
            data.tasks.len()
        );
        Self::with_data(clock, data.projects, data.tags, data.tasks)
    }

    pub fn with_data(clock: C, projects: Vec<Project>, tags: Vec<Tag>, tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            projects,
            tags,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl Default for InMemoryRepository<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::local())
    }
}

impl<C: Clock> Repository for InMemoryRepository<C> {
    fn today(&self) -> Today {
        self.clock.calendar()
    }
}

/// Generates `<prefix>-<uuid v7>` ids, retrying on the (practically
/// impossible) collision with an id already in use.
pub(crate) fn generate_id(prefix: &str, in_use: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = format!("{}-{}", prefix, Uuid::now_v7());
        if !in_use(&candidate) {
            return candidate;
        }
    }
}
