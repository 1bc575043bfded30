use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::{NewProjectData, Project, ProjectId, ProjectRemoval, UpdateProjectData};
use crate::repository::{generate_id, InMemoryRepository, ProjectRepository};
use log::{debug, info};

impl<C: Clock> ProjectRepository for InMemoryRepository<C> {
    fn add_project(&mut self, data: NewProjectData) -> Project {
        let id = generate_id("project", |candidate| {
            self.projects.iter().any(|project| project.id.as_str() == candidate)
        });
        let project = Project {
            id: ProjectId::new(id),
            name: data.name,
            color: data.color,
            description: data.description,
        };

        debug!("Added project {} ({})", project.id, project.name);
        self.projects.push(project.clone());
        project
    }

    fn update_project(&mut self, id: &ProjectId, data: UpdateProjectData) -> Option<Project> {
        let Some(project) = self.projects.iter_mut().find(|project| &project.id == id) else {
            debug!("Ignoring update for unknown project {}", id);
            return None;
        };

        data.apply(project);
        debug!("Updated project {}", id);
        Some(project.clone())
    }

    fn delete_project(&mut self, id: &ProjectId) -> Option<ProjectRemoval> {
        let Some(index) = self.projects.iter().position(|project| &project.id == id) else {
            debug!("Ignoring delete for unknown project {}", id);
            return None;
        };

        let project = self.projects.remove(index);
        let before = self.tasks.len();
        self.tasks.retain(|task| task.project_id != project.id);
        let removed_tasks = before - self.tasks.len();

        info!(
            "Deleted project {} ({}) and {} task(s)",
            project.id, project.name, removed_tasks
        );
        Some(ProjectRemoval {
            project,
            removed_tasks,
        })
    }

    fn projects(&self) -> &[Project] {
        &self.projects
    }

    fn get_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    fn ensure_project_exists(&self, id: &ProjectId) -> Result<&Project, CoreError> {
        self.get_project(id)
            .ok_or_else(|| CoreError::NotFound(format!("Project '{}' does not exist", id)))
    }
}
