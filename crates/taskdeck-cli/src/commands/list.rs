use anyhow::Result;
use log::debug;
use owo_colors::OwoColorize;
use taskdeck_core::clock::Clock;
use taskdeck_core::models::Task;
use taskdeck_core::repository::TaskRepository;

use super::Session;
use crate::cli::{ListCommand, ListOptions};
use crate::query_parser;
use crate::util::resolve_query_names;
use crate::views::table::{display_tasks, sort_caption};

pub fn list_tasks<C: Clock>(session: &Session<C>, command: ListCommand) -> Result<()> {
    let repo = &session.repo;
    let candidates: Vec<&Task> = match query_parser::parse_query(&command.query)? {
        Some(query) => {
            let query = resolve_query_names(query, repo);
            debug!("Running query {:?}", query);
            repo.find_tasks(&query)
        }
        None => repo.tasks().iter().collect(),
    };

    render(session, "All Tasks", candidates, &command.options);
    Ok(())
}

pub fn list_due_today<C: Clock>(session: &Session<C>, options: ListOptions) -> Result<()> {
    render(session, "Due Today", session.repo.get_tasks_due_today(), &options);
    Ok(())
}

pub(crate) fn render<C: Clock>(
    session: &Session<C>,
    heading: &str,
    candidates: Vec<&Task>,
    options: &ListOptions,
) {
    let view = session.list_view(options);
    let tasks = view.render(candidates);
    let today = session.today();

    println!("{}", format!("{} ({})", heading, tasks.len()).bold());
    display_tasks(&tasks, &session.repo, session.table_context(&today));
    println!("{}", sort_caption(view.sort).dimmed());
}
