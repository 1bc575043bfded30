use anyhow::Result;
use owo_colors::OwoColorize;
use taskdeck_core::clock::Clock;
use taskdeck_core::repository::TaskRepository;
use taskdeck_core::view;

use super::{list, Session};
use crate::cli::{ProjectCommand, ProjectSubcommand};
use crate::util::resolve_project;
use crate::views::table::display_projects;

pub fn project_command<C: Clock>(session: &Session<C>, command: ProjectCommand) -> Result<()> {
    match command.command {
        ProjectSubcommand::List => {
            display_projects(&view::project_task_counts(&session.repo));
            Ok(())
        }
        ProjectSubcommand::Show(show) => {
            let project = resolve_project(&session.repo, &show.project)?;
            println!("{} {}", project.name.bold(), format!("[{}]", project.id).dimmed());
            if !project.description.is_empty() {
                println!("{}", project.description);
            }
            println!();

            let tasks = session.repo.get_tasks_by_project(&project.id);
            list::render(session, "Tasks", tasks, &show.options);
            Ok(())
        }
    }
}
