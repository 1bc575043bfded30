use anyhow::Result;
use owo_colors::OwoColorize;
use taskdeck_core::clock::Clock;
use taskdeck_core::models::Task;
use taskdeck_core::repository::InMemoryRepository;
use taskdeck_core::view::{self, SortState};

use super::Session;
use crate::views::table::{display_tasks, stats_table, TableContext};

pub fn show_dashboard<C: Clock>(session: &Session<C>) -> Result<()> {
    let dashboard = view::dashboard(&session.repo);
    let today = session.today();
    let ctx = session.table_context(&today);
    let sort = session.config.list.sort_state();

    println!("{}", "Dashboard".bold());
    println!("{}", today.date.format("%A, %B %-d, %Y").dimmed());
    println!("{}", stats_table(&dashboard.stats));

    section(&session.repo, "Due Today", dashboard.due_today, sort, ctx);
    section(&session.repo, "Overdue", dashboard.overdue, sort, ctx);
    section(&session.repo, "In Progress", dashboard.in_progress, sort, ctx);
    Ok(())
}

fn section<C: Clock>(
    repo: &InMemoryRepository<C>,
    heading: &str,
    mut tasks: Vec<&Task>,
    sort: SortState,
    ctx: TableContext<'_>,
) {
    println!();
    println!("{}", format!("{} ({})", heading, tasks.len()).bold());
    view::sort_tasks(&mut tasks, sort);
    display_tasks(&tasks, repo, ctx);
}
