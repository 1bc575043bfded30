use chrono::{DateTime, Utc};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Row, Table};
use taskdeck_core::clock::Today;
use taskdeck_core::display::{format_due_date, truncate_text};
use taskdeck_core::models::{Priority, Status, Tag, Task, TaskStats};
use taskdeck_core::repository::Repository;
use taskdeck_core::view::{ProjectTaskCount, SortState};

/// Per-render settings that do not come from the task itself
#[derive(Debug, Clone, Copy)]
pub struct TableContext<'a> {
    pub today: &'a Today,
    pub now: DateTime<Utc>,
    pub title_width: usize,
}

pub fn task_table(tasks: &[&Task], repo: &impl Repository, ctx: TableContext<'_>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Title", "Status", "Priority", "Due", "Project", "Tags", "Created",
    ]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id.as_str()));

        let mut title_cell = Cell::new(truncate_text(&task.title, ctx.title_width));
        title_cell = match task.status {
            Status::Completed => title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey),
            _ if task.priority == Priority::High => title_cell.add_attribute(Attribute::Bold),
            _ => title_cell,
        };
        row.add_cell(title_cell);

        row.add_cell(Cell::new(task.status.label()).fg(status_color(task.status)));
        row.add_cell(Cell::new(task.priority.label()).fg(priority_color(task.priority)));

        let due_text = format_due_date(task.due_date, ctx.today);
        let due_cell = if ctx.today.is_overdue(task) {
            Cell::new(due_text).fg(Color::Red)
        } else if ctx.today.is_due_today(task) && !task.is_completed() {
            Cell::new(due_text).fg(Color::Yellow)
        } else {
            Cell::new(due_text)
        };
        row.add_cell(due_cell);

        let project = repo
            .get_project(&task.project_id)
            .map(|p| p.name.as_str())
            .unwrap_or("None");
        row.add_cell(Cell::new(project));
        row.add_cell(Cell::new(tag_names(&repo.resolve_tags(task))));
        row.add_cell(Cell::new(HumanTime::from(task.created_at - ctx.now)));
        table.add_row(row);
    }

    table
}

pub fn display_tasks(tasks: &[&Task], repo: &impl Repository, ctx: TableContext<'_>) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!("{}", task_table(tasks, repo, ctx));
}

pub fn project_table(counts: &[ProjectTaskCount<'_>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Color", "Tasks"]);

    for entry in counts {
        let mut row = Row::new();
        row.add_cell(Cell::new(entry.project.id.as_str()));
        row.add_cell(Cell::new(&entry.project.name).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(&entry.project.description));
        row.add_cell(Cell::new(&entry.project.color));
        row.add_cell(Cell::new(entry.task_count).set_alignment(CellAlignment::Right));
        table.add_row(row);
    }

    table
}

pub fn display_projects(counts: &[ProjectTaskCount<'_>]) {
    if counts.is_empty() {
        println!("No projects found.");
        return;
    }
    println!("{}", project_table(counts));
}

pub fn tag_table(tags: &[Tag], repo: &impl Repository) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color", "Tasks"]);

    for tag in tags {
        let mut row = Row::new();
        row.add_cell(Cell::new(tag.id.as_str()));
        row.add_cell(Cell::new(&tag.name));
        row.add_cell(Cell::new(&tag.color));
        row.add_cell(
            Cell::new(repo.get_tasks_by_tag(&tag.id).len()).set_alignment(CellAlignment::Right),
        );
        table.add_row(row);
    }

    table
}

pub fn display_tags(repo: &impl Repository) {
    if repo.tags().is_empty() {
        println!("No tags found.");
        return;
    }
    println!("{}", tag_table(repo.tags(), repo));
}

/// The dashboard's four stat cards as one row.
pub fn stats_table(stats: &TaskStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Total Tasks", "Completed", "In Progress", "Overdue"]);
    table.add_row(vec![
        Cell::new(stats.total),
        Cell::new(format!("{} ({}%)", stats.completed, stats.completion_rate())).fg(Color::Green),
        Cell::new(format!("{} ({}%)", stats.in_progress, stats.share_of(stats.in_progress)))
            .fg(Color::Blue),
        Cell::new(format!("{} ({}%)", stats.overdue, stats.share_of(stats.overdue))).fg(Color::Red),
    ]);
    table
}

/// "Sorted by due-date (ascending)"
pub fn sort_caption(sort: SortState) -> String {
    let key = serde_plain::to_string(&sort.key).unwrap_or_else(|_| sort.key.to_string());
    let direction = serde_plain::to_string(&sort.direction).unwrap_or_default();
    format!("Sorted by {} ({})", key, direction)
}

fn tag_names(tags: &[&Tag]) -> String {
    if tags.is_empty() {
        "None".to_string()
    } else {
        tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Reset,
        Status::InProgress => Color::Blue,
        Status::Completed => Color::Green,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
