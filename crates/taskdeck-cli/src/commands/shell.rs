//! Interactive session: the menu-driven counterpart of the task and project
//! forms. Everything happens in one process, so changes persist until exit.

use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use log::info;
use owo_colors::OwoColorize;
use taskdeck_core::clock::{Clock, Today};
use taskdeck_core::display::format_due_date;
use taskdeck_core::models::{
    NewProjectData, NewTaskData, Priority, Project, ProjectId, Status, TagId, Task, TaskId,
    UpdateProjectData, UpdateTaskData,
};
use taskdeck_core::repository::{ProjectRepository, Repository, TagRepository, TaskRepository};
use taskdeck_core::view::{self, SortKey};

use super::{dashboard, list, Session};
use crate::cli::ListOptions;
use crate::parser::parse_optional_due_date;
use crate::views::table::{display_projects, sort_caption};

const ACTIONS: [&str; 13] = [
    "Dashboard",
    "All tasks",
    "Due today",
    "Projects",
    "Add task",
    "Edit task",
    "Toggle task completion",
    "Delete task",
    "Add project",
    "Edit project",
    "Delete project",
    "Change sort",
    "Quit",
];

/// Values of the task form, before they become a new task or a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<DateTime<Utc>>,
    pub project_id: ProjectId,
    pub tags: Vec<TagId>,
}

impl TaskForm {
    /// Blank form; the project defaults to the first one, as in the add dialog.
    pub fn blank(repo: &impl Repository) -> Option<Self> {
        let project = repo.projects().first()?;
        Some(Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            due_date: None,
            project_id: project.id.clone(),
            tags: Vec::new(),
        })
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
            project_id: task.project_id.clone(),
            tags: task.tags.clone(),
        }
    }

    pub fn into_new_task(self) -> NewTaskData {
        NewTaskData {
            title: self.title.trim().to_string(),
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
            project_id: self.project_id,
            tags: self.tags,
        }
    }

    /// Patch holding only the fields that differ from `task`.
    pub fn patch_for(self, task: &Task) -> UpdateTaskData {
        let title = self.title.trim().to_string();
        UpdateTaskData {
            title: (title != task.title).then_some(title),
            description: (self.description != task.description).then_some(self.description),
            priority: (self.priority != task.priority).then_some(self.priority),
            status: (self.status != task.status).then_some(self.status),
            due_date: (self.due_date != task.due_date).then_some(self.due_date),
            project_id: (self.project_id != task.project_id).then_some(self.project_id),
            tags: (self.tags != task.tags).then_some(self.tags),
        }
    }
}

/// Patch holding only the project fields that changed.
pub fn project_patch(
    project: &Project,
    name: String,
    description: String,
    color: String,
) -> UpdateProjectData {
    let name = name.trim().to_string();
    UpdateProjectData {
        name: (name != project.name).then_some(name),
        description: (description != project.description).then_some(description),
        color: (color != project.color).then_some(color),
    }
}

pub fn run_shell<C: Clock>(session: &mut Session<C>) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        return Err(anyhow!("The shell needs an interactive terminal"));
    }

    let mut options = ListOptions::default();
    loop {
        println!();
        let action = Select::new()
            .with_prompt("What would you like to do?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match ACTIONS[action] {
            "Dashboard" => dashboard::show_dashboard(session)?,
            "All tasks" => {
                let tasks = session.repo.tasks().iter().collect();
                list::render(session, "All Tasks", tasks, &options);
            }
            "Due today" => list::list_due_today(session, options.clone())?,
            "Projects" => display_projects(&view::project_task_counts(&session.repo)),
            "Add task" => add_task(session)?,
            "Edit task" => edit_task(session)?,
            "Toggle task completion" => toggle_task(session)?,
            "Delete task" => delete_task(session)?,
            "Add project" => add_project(session)?,
            "Edit project" => edit_project(session)?,
            "Delete project" => delete_project(session)?,
            "Change sort" => change_sort(session, &mut options)?,
            _ => break,
        }
    }
    Ok(())
}

fn add_task<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(blank) = TaskForm::blank(&session.repo) else {
        println!("{}", "Create a project first.".yellow());
        return Ok(());
    };
    let data = task_form(session, blank)?.into_new_task();
    data.validate()?;
    session.repo.ensure_project_exists(&data.project_id)?;

    let task = session.repo.add_task(data);
    println!("{} Task '{}' added ({}).", "✓".green(), task.title, task.id);
    Ok(())
}

fn edit_task<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(id) = pick_task(session, "Task to edit")? else {
        return Ok(());
    };
    let Some(task) = session.repo.get_task(&id).cloned() else {
        return Ok(());
    };

    let patch = task_form(session, TaskForm::from_task(&task))?.patch_for(&task);
    if patch.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    patch.validate()?;
    if let Some(updated) = session.repo.update_task(&id, patch) {
        println!("{} Task '{}' updated.", "✓".green(), updated.title);
    }
    Ok(())
}

fn toggle_task<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(id) = pick_task(session, "Task to toggle")? else {
        return Ok(());
    };
    if let Some(task) = session.repo.toggle_task_completion(&id) {
        println!("'{}' is now {}.", task.title, task.status.label());
    }
    Ok(())
}

fn delete_task<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(id) = pick_task(session, "Task to delete")? else {
        return Ok(());
    };
    let Some(title) = session.repo.get_task(&id).map(|t| t.title.clone()) else {
        return Ok(());
    };

    let confirmed = Confirm::new()
        .with_prompt(format!("Are you sure you want to delete task '{}'?", title))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Deletion cancelled.");
        return Ok(());
    }

    if session.repo.delete_task(&id).is_some() {
        println!("{} Task '{}' deleted.", "✓".green(), title);
    }
    Ok(())
}

fn add_project<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let defaults = NewProjectData::new("");
    let (name, description, color) =
        project_form(&defaults.name, &defaults.description, &defaults.color)?;
    let data = NewProjectData {
        name: name.trim().to_string(),
        description,
        color,
    };
    data.validate()?;

    let project = session.repo.add_project(data);
    println!("{} Project '{}' added ({}).", "✓".green(), project.name, project.id);
    Ok(())
}

fn edit_project<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(project) = pick_project(session, "Project to edit")? else {
        return Ok(());
    };
    let (name, description, color) =
        project_form(&project.name, &project.description, &project.color)?;

    let patch = project_patch(&project, name, description, color);
    if patch.is_empty() {
        println!("No changes.");
        return Ok(());
    }
    patch.validate()?;
    if let Some(updated) = session.repo.update_project(&project.id, patch) {
        println!("{} Project '{}' updated.", "✓".green(), updated.name);
    }
    Ok(())
}

fn delete_project<C: Clock>(session: &mut Session<C>) -> Result<()> {
    let Some(project) = pick_project(session, "Project to delete")? else {
        return Ok(());
    };
    let task_count = session.repo.get_tasks_by_project(&project.id).len();

    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete project '{}'? This will also delete its {} task(s).",
            project.name, task_count
        ))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Deletion cancelled.");
        return Ok(());
    }

    if let Some(removal) = session.repo.delete_project(&project.id) {
        info!(
            "Shell removed project {} with {} tasks",
            removal.project.id, removal.removed_tasks
        );
        println!(
            "{} Project '{}' and {} task(s) deleted.",
            "✓".green(),
            removal.project.name,
            removal.removed_tasks
        );
    }
    Ok(())
}

fn change_sort<C: Clock>(session: &Session<C>, options: &mut ListOptions) -> Result<()> {
    let keys = [SortKey::Priority, SortKey::DueDate, SortKey::Title];
    let labels = ["Priority", "Due date", "Title"];
    let choice = Select::new()
        .with_prompt("Sort by (choosing the current key flips the direction)")
        .items(&labels)
        .default(0)
        .interact()?;

    let mut sort = session.list_view(options).sort;
    sort.toggle(keys[choice]);
    options.sort = Some(sort.key);
    options.asc = sort.direction == view::SortDirection::Ascending;
    options.desc = !options.asc;
    println!("{}", sort_caption(sort).dimmed());
    Ok(())
}

fn task_form<C: Clock>(session: &Session<C>, initial: TaskForm) -> Result<TaskForm> {
    let repo = &session.repo;
    let today = repo.today();
    let now = repo.clock().now();
    let projects = repo.projects();
    if projects.is_empty() {
        return Err(anyhow!("Create a project first"));
    }

    let title: String = Input::new()
        .with_prompt("Title")
        .with_initial_text(initial.title.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Title is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let description: String = Input::new()
        .with_prompt("Description")
        .with_initial_text(initial.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let priority = Priority::ALL[Select::new()
        .with_prompt("Priority")
        .items(&Priority::ALL.map(Priority::label))
        .default(index_of(&Priority::ALL, &initial.priority))
        .interact()?];

    let status = Status::ALL[Select::new()
        .with_prompt("Status")
        .items(&Status::ALL.map(Status::label))
        .default(index_of(&Status::ALL, &initial.status))
        .interact()?];

    let due_date = prompt_due_date(initial.due_date, &today, now)?;

    let project_index = Select::new()
        .with_prompt("Project")
        .items(&projects.iter().map(|p| p.name.as_str()).collect::<Vec<_>>())
        .default(
            projects
                .iter()
                .position(|p| p.id == initial.project_id)
                .unwrap_or(0),
        )
        .interact()?;

    let tags = repo.tags();
    let checked: Vec<bool> = tags.iter().map(|t| initial.tags.contains(&t.id)).collect();
    let picked = MultiSelect::new()
        .with_prompt("Tags (space to toggle)")
        .items(&tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>())
        .defaults(&checked)
        .interact()?;
    // Dangling ids the form cannot show are kept.
    let mut tag_ids: Vec<TagId> = initial
        .tags
        .iter()
        .filter(|id| repo.get_tag(id).is_none())
        .cloned()
        .collect();
    tag_ids.extend(picked.into_iter().map(|i| tags[i].id.clone()));

    Ok(TaskForm {
        title,
        description,
        priority,
        status,
        due_date,
        project_id: projects[project_index].id.clone(),
        tags: tag_ids,
    })
}

fn prompt_due_date(
    initial: Option<DateTime<Utc>>,
    today: &Today,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>> {
    let tz: Tz = today.tz;
    let current = initial
        .map(|due| due.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let hint = format_due_date(initial, today);

    let input: String = Input::new()
        .with_prompt(format!("Due date ({}; blank for none)", hint))
        .with_initial_text(current)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_optional_due_date(input, now, tz)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;

    parse_optional_due_date(&input, now, tz)
}

fn project_form(name: &str, description: &str, color: &str) -> Result<(String, String, String)> {
    let name: String = Input::new()
        .with_prompt("Project name")
        .with_initial_text(name)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Project name is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description")
        .with_initial_text(description)
        .allow_empty(true)
        .interact_text()?;
    let color: String = Input::new()
        .with_prompt("Color")
        .with_initial_text(color)
        .interact_text()?;
    Ok((name, description, color))
}

fn pick_task<C: Clock>(session: &Session<C>, prompt: &str) -> Result<Option<TaskId>> {
    let repo = &session.repo;
    let today = repo.today();
    let tasks = session.list_view(&ListOptions::default()).render(repo.tasks());
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(None);
    }

    let labels: Vec<String> = tasks
        .iter()
        .map(|t| {
            format!(
                "[{}] {} ({})",
                t.status.label(),
                t.title,
                format_due_date(t.due_date, &today)
            )
        })
        .collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| tasks[i].id.clone()))
}

fn pick_project<C: Clock>(session: &Session<C>, prompt: &str) -> Result<Option<Project>> {
    let projects = session.repo.projects();
    if projects.is_empty() {
        println!("No projects found.");
        return Ok(None);
    }

    let choice = Select::new()
        .with_prompt(prompt)
        .items(&projects.iter().map(|p| p.name.as_str()).collect::<Vec<_>>())
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| projects[i].clone()))
}

fn index_of<T: PartialEq>(items: &[T], item: &T) -> usize {
    items.iter().position(|i| i == item).unwrap_or(0)
}
