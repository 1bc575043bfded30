use crate::clock::Clock;
use crate::models::{
    dedup_tags, NewTaskData, Priority, ProjectId, Status, TagId, Task, TaskId, UpdateTaskData,
};
use crate::query::Query;
use crate::repository::{generate_id, InMemoryRepository, TaskRepository};
use log::{debug, warn};

impl<C: Clock> InMemoryRepository<C> {
    fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn select_tasks(&self, predicate: impl Fn(&Task) -> bool) -> Vec<&Task> {
        self.tasks.iter().filter(|task| predicate(task)).collect()
    }
}

impl<C: Clock> TaskRepository for InMemoryRepository<C> {
    fn add_task(&mut self, data: NewTaskData) -> Task {
        if !self.projects.iter().any(|project| project.id == data.project_id) {
            warn!(
                "Task '{}' references unknown project {}",
                data.title, data.project_id
            );
        }

        let id = generate_id("task", |candidate| {
            self.tasks.iter().any(|task| task.id.as_str() == candidate)
        });
        let task = Task {
            id: TaskId::new(id),
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            created_at: self.clock.now(),
            project_id: data.project_id,
            tags: dedup_tags(data.tags),
        };

        debug!("Added task {} to project {}", task.id, task.project_id);
        self.tasks.push(task.clone());
        task
    }

    fn update_task(&mut self, id: &TaskId, data: UpdateTaskData) -> Option<Task> {
        let Some(index) = self.task_index(id) else {
            debug!("Ignoring update for unknown task {}", id);
            return None;
        };

        let task = &mut self.tasks[index];
        data.apply(task);
        debug!("Updated task {}", id);
        Some(task.clone())
    }

    fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        let Some(index) = self.task_index(id) else {
            debug!("Ignoring delete for unknown task {}", id);
            return None;
        };

        debug!("Deleted task {}", id);
        Some(self.tasks.remove(index))
    }

    fn toggle_task_completion(&mut self, id: &TaskId) -> Option<Task> {
        let status = match self.get_task(id)?.status {
            Status::Completed => Status::Todo,
            Status::Todo | Status::InProgress => Status::Completed,
        };
        self.update_task(
            id,
            UpdateTaskData {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    fn get_tasks_by_project(&self, project_id: &ProjectId) -> Vec<&Task> {
        self.select_tasks(|task| &task.project_id == project_id)
    }

    fn get_tasks_by_status(&self, status: Status) -> Vec<&Task> {
        self.select_tasks(|task| task.status == status)
    }

    fn get_tasks_by_priority(&self, priority: Priority) -> Vec<&Task> {
        self.select_tasks(|task| task.priority == priority)
    }

    fn get_tasks_by_tag(&self, tag_id: &TagId) -> Vec<&Task> {
        self.select_tasks(|task| task.has_tag(tag_id))
    }

    fn get_overdue_tasks(&self) -> Vec<&Task> {
        let today = self.clock.calendar();
        self.select_tasks(|task| today.is_overdue(task))
    }

    fn get_tasks_due_today(&self) -> Vec<&Task> {
        let today = self.clock.calendar();
        self.select_tasks(|task| today.is_due_today(task))
    }

    fn find_tasks(&self, query: &Query) -> Vec<&Task> {
        let today = self.clock.calendar();
        self.select_tasks(|task| query.matches(task, &today))
    }
}
